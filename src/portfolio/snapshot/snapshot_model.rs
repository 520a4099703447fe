use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DECIMAL_PRECISION;

/// One entry of the append-only valuation log, captured after every mutating
/// operation and truncated to the most recent year.
///
/// `day_change` is kept with its source name but is literally
/// `total_value - total_cost`, i.e. total unrealized P&L rather than a
/// day-over-day delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSnapshot {
    pub id: String,
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub captured_at: DateTime<Utc>,
    pub day_change: Decimal,
    pub day_change_percent: Decimal,
}

impl ValuationSnapshot {
    pub fn capture(total_value: Decimal, total_cost: Decimal) -> Self {
        let day_change = total_value - total_cost;
        let day_change_percent = if total_cost.is_zero() {
            Decimal::ZERO
        } else {
            (day_change / total_cost * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION)
        };
        ValuationSnapshot {
            id: Uuid::new_v4().to_string(),
            total_value,
            total_cost,
            captured_at: Utc::now(),
            day_change,
            day_change_percent,
        }
    }
}
