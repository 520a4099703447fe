use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::snapshot::ValuationSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

impl Timeframe {
    /// Window size in days; `None` means the whole history.
    pub fn days(&self) -> Option<i64> {
        match self {
            Timeframe::OneDay => Some(1),
            Timeframe::OneWeek => Some(7),
            Timeframe::OneMonth => Some(30),
            Timeframe::ThreeMonths => Some(90),
            Timeframe::SixMonths => Some(180),
            Timeframe::OneYear => Some(365),
            Timeframe::All => None,
        }
    }
}

/// One chart point derived from a valuation snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub timestamp: DateTime<Utc>,
    pub value: Decimal,
    pub label: String,
}

/// Maps the snapshots inside the timeframe window (relative to `now`) to
/// chart points, preserving capture order.
pub fn performance_points(
    snapshots: &[ValuationSnapshot],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<PerformancePoint> {
    let cutoff = timeframe.days().map(|days| now - Duration::days(days));
    snapshots
        .iter()
        .filter(|snapshot| cutoff.map_or(true, |cutoff| snapshot.captured_at >= cutoff))
        .map(|snapshot| {
            let label = match timeframe {
                Timeframe::OneDay => snapshot.captured_at.format("%H:%M").to_string(),
                _ => snapshot.captured_at.format("%b %d").to_string(),
            };
            PerformancePoint {
                timestamp: snapshot.captured_at,
                value: snapshot.total_value,
                label,
            }
        })
        .collect()
}
