use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DECIMAL_PRECISION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Stock,
    Crypto,
    Forex,
    Etf,
    Index,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Stock => "stock",
            AssetClass::Crypto => "crypto",
            AssetClass::Forex => "forex",
            AssetClass::Etf => "etf",
            AssetClass::Index => "index",
        }
    }
}

/// A position in the active portfolio.
///
/// `total_value` is derived and must equal `quantity * current_price` after
/// every mutation; all write paths go through [`Holding::recompute_total`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub asset_class: AssetClass,
    pub quantity: Decimal,
    pub current_price: Decimal,
    pub total_value: Decimal,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

/// Input model for adding a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub name: String,
    pub symbol: String,
    pub asset_class: AssetClass,
    pub quantity: Decimal,
    pub current_price: Decimal,
    #[serde(default)]
    pub price_change: Decimal,
    #[serde(default)]
    pub price_change_percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

impl Holding {
    pub fn from_new(draft: NewHolding) -> Self {
        let mut holding = Holding {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            symbol: draft.symbol,
            asset_class: draft.asset_class,
            quantity: draft.quantity,
            current_price: draft.current_price,
            total_value: Decimal::ZERO,
            price_change: draft.price_change,
            price_change_percent: draft.price_change_percent,
            average_price: draft.average_price,
            exchange: draft.exchange,
        };
        holding.recompute_total();
        holding
    }

    /// Re-derives `total_value` from quantity and current price.
    pub fn recompute_total(&mut self) {
        self.total_value = (self.quantity * self.current_price).round_dp(DECIMAL_PRECISION);
    }

    /// Price used as the cost basis: average acquisition price when known,
    /// otherwise the current price.
    pub fn cost_basis_price(&self) -> Decimal {
        self.average_price.unwrap_or(self.current_price)
    }

    pub fn cost_basis(&self) -> Decimal {
        (self.quantity * self.cost_basis_price()).round_dp(DECIMAL_PRECISION)
    }

    /// Folds another position of the same symbol into this one.
    ///
    /// Average price becomes the quantity-weighted mean of both cost basis
    /// prices, quantities sum and the incoming current price wins. The change
    /// fields are replaced only when the incoming change is non-zero: a zero
    /// change is treated as "no new data" (source behavior, kept as-is even
    /// though a genuine zero change can never be recorded).
    pub fn merge(
        &mut self,
        quantity: Decimal,
        basis_price: Decimal,
        current_price: Decimal,
        price_change: Decimal,
        price_change_percent: Decimal,
    ) {
        let combined_quantity = self.quantity + quantity;
        if !combined_quantity.is_zero() {
            let weighted = self.quantity * self.cost_basis_price() + quantity * basis_price;
            self.average_price = Some((weighted / combined_quantity).round_dp(DECIMAL_PRECISION));
        }
        self.quantity = combined_quantity;
        self.current_price = current_price;
        if !price_change.is_zero() {
            self.price_change = price_change;
            self.price_change_percent = price_change_percent;
        }
        self.recompute_total();
    }

    pub fn merge_new(&mut self, draft: &NewHolding) {
        self.merge(
            draft.quantity,
            draft.average_price.unwrap_or(draft.current_price),
            draft.current_price,
            draft.price_change,
            draft.price_change_percent,
        );
    }

    /// Applies a fresh price, recomputing the change fields against the
    /// previous price and the derived total.
    pub fn apply_price(&mut self, new_price: Decimal, change: Decimal, change_percent: Decimal) {
        self.current_price = new_price;
        self.price_change = change;
        self.price_change_percent = change_percent;
        self.recompute_total();
    }
}
