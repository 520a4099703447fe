use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DECIMAL_PRECISION;
use crate::holdings::Holding;
use crate::portfolio::snapshot::ValuationSnapshot;

/// A named collection of holdings. Aggregates are views recomputed from the
/// holdings on every read; they are never stored or mutated independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new(id: String, name: String) -> Self {
        Portfolio {
            id,
            name,
            holdings: Vec::new(),
        }
    }

    pub fn with_local_id(name: String) -> Self {
        Portfolio::new(Uuid::new_v4().to_string(), name)
    }

    pub fn total_value(&self) -> Decimal {
        self.holdings.iter().map(|h| h.total_value).sum()
    }

    pub fn total_cost(&self) -> Decimal {
        self.holdings.iter().map(|h| h.cost_basis()).sum()
    }

    pub fn total_change(&self) -> Decimal {
        self.total_value() - self.total_cost()
    }

    pub fn total_change_percent(&self) -> Decimal {
        let cost = self.total_cost();
        if cost.is_zero() {
            return Decimal::ZERO;
        }
        (self.total_change() / cost * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION)
    }

    pub fn find_holding_by_symbol_mut(&mut self, symbol: &str) -> Option<&mut Holding> {
        // exact, case-sensitive ticker match
        self.holdings.iter_mut().find(|h| h.symbol == symbol)
    }

    pub fn find_holding_mut(&mut self, id: &str) -> Option<&mut Holding> {
        self.holdings.iter_mut().find(|h| h.id == id)
    }
}

/// Shape of the exported/imported backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub portfolios: Vec<Portfolio>,
    pub snapshots: Vec<ValuationSnapshot>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}
