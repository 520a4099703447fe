use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PORTFOLIO_NAME;
use crate::holdings::Holding;
use crate::portfolio::snapshot::ValuationSnapshot;
use crate::portfolio::Portfolio;

/// The full persisted state snapshot, written as one JSON document after
/// every mutating operation. The store is a passive mirror of this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub portfolios: Vec<Portfolio>,
    pub current_portfolio_id: String,
    /// Mirror of the active portfolio's holdings, refreshed on every save.
    #[serde(default)]
    pub assets: Vec<Holding>,
    #[serde(default)]
    pub snapshots: Vec<ValuationSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refresh: Option<DateTime<Utc>>,
}

impl Default for AppState {
    fn default() -> Self {
        let seeded = Portfolio::with_local_id(DEFAULT_PORTFOLIO_NAME.to_string());
        let current_portfolio_id = seeded.id.clone();
        AppState {
            portfolios: vec![seeded],
            current_portfolio_id,
            assets: Vec::new(),
            snapshots: Vec::new(),
            api_base_url: None,
            api_key: None,
            last_refresh: None,
        }
    }
}

impl AppState {
    pub fn active_portfolio(&self) -> Option<&Portfolio> {
        self.portfolios
            .iter()
            .find(|p| p.id == self.current_portfolio_id)
    }

    pub fn active_portfolio_mut(&mut self) -> Option<&mut Portfolio> {
        let id = self.current_portfolio_id.clone();
        self.portfolios.iter_mut().find(|p| p.id == id)
    }

    /// Guarantees at least one portfolio exists and the active pointer is
    /// valid, seeding the default portfolio when needed.
    pub fn ensure_active_portfolio(&mut self) {
        if self.portfolios.is_empty() {
            let seeded = Portfolio::with_local_id(DEFAULT_PORTFOLIO_NAME.to_string());
            self.current_portfolio_id = seeded.id.clone();
            self.portfolios.push(seeded);
            return;
        }
        if !self
            .portfolios
            .iter()
            .any(|p| p.id == self.current_portfolio_id)
        {
            self.current_portfolio_id = self.portfolios[0].id.clone();
        }
    }

    /// Refreshes the persisted mirror of the active portfolio's holdings.
    pub fn sync_assets_mirror(&mut self) {
        self.assets = self
            .active_portfolio()
            .map(|p| p.holdings.clone())
            .unwrap_or_default();
    }
}
