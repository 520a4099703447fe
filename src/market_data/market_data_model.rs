use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::AssetClass;

/// One asset search result, either from the backend or from the offline
/// fallback catalog (in which case the price fields are generated).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub symbol: String,
    pub name: String,
    pub asset_class: AssetClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    pub price: Decimal,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
}

/// Latest price for a single symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub symbol: String,
    pub price: Decimal,
    pub price_change: Decimal,
    pub price_change_percent: Decimal,
}
