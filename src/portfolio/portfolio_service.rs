use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use uuid::Uuid;

use crate::constants::{EXPORT_VERSION, SNAPSHOT_HISTORY_LIMIT};
use crate::errors::Result;
use crate::holdings::{AssetClass, Holding, NewHolding};
use crate::market_data::{fallback_provider, PriceQuote, QuoteSummary, RemoteApiTrait};
use crate::portfolio::performance::{performance_points, PerformancePoint, Timeframe};
use crate::portfolio::portfolio_errors::PortfolioError;
use crate::portfolio::portfolio_model::{ExportData, Portfolio};
use crate::portfolio::snapshot::ValuationSnapshot;
use crate::storage::{AppState, StateStoreTrait};
use crate::utils::with_remote_fallback;

/// The portfolio aggregator: exclusively owns the in-memory portfolio,
/// holding and snapshot collections, recomputes derived values on every
/// mutation and mirrors the full state to the injected store afterwards.
///
/// Remote calls are opportunistic: any rejection degrades to local behavior.
/// Only validation errors (last-portfolio deletion, malformed imports,
/// unknown holding updates) surface to the caller.
pub struct PortfolioService {
    state: RwLock<AppState>,
    store: Arc<dyn StateStoreTrait>,
    remote: Arc<dyn RemoteApiTrait>,
}

impl PortfolioService {
    /// Loads the persisted state (falling back to the seeded default when
    /// the store is empty or unreadable) and builds the service.
    pub async fn initialize(
        store: Arc<dyn StateStoreTrait>,
        remote: Arc<dyn RemoteApiTrait>,
    ) -> Self {
        let mut state = match store.load().await {
            Ok(Some(state)) => state,
            Ok(None) => AppState::default(),
            Err(e) => {
                error!("Failed to load persisted state, starting fresh: {}", e);
                AppState::default()
            }
        };
        state.ensure_active_portfolio();
        PortfolioService {
            state: RwLock::new(state),
            store,
            remote,
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Best-effort full-state write; failures are logged, never surfaced.
    async fn persist(&self) {
        let snapshot = {
            let mut state = self.write_state();
            state.sync_assets_mirror();
            state.clone()
        };
        if let Err(e) = self.store.save(&snapshot).await {
            error!("Failed to persist state: {}", e);
        }
    }

    fn append_snapshot_locked(state: &mut AppState) {
        let (total_value, total_cost) = state
            .active_portfolio()
            .map(|p| (p.total_value(), p.total_cost()))
            .unwrap_or_default();
        state
            .snapshots
            .push(ValuationSnapshot::capture(total_value, total_cost));
        if state.snapshots.len() > SNAPSHOT_HISTORY_LIMIT {
            let excess = state.snapshots.len() - SNAPSHOT_HISTORY_LIMIT;
            state.snapshots.drain(..excess);
        }
    }

    // --- Portfolio lifecycle ---

    /// Creates a portfolio, preferring a server-assigned id but silently
    /// degrading to a local one, and makes it active.
    pub async fn create_portfolio(&self, name: &str) -> Portfolio {
        let id = with_remote_fallback(
            "Remote portfolio creation",
            self.remote.create_portfolio(name),
            || Uuid::new_v4().to_string(),
        )
        .await;

        let portfolio = Portfolio::new(id, name.to_string());
        {
            let mut state = self.write_state();
            state.current_portfolio_id = portfolio.id.clone();
            state.portfolios.push(portfolio.clone());
        }
        self.persist().await;
        portfolio
    }

    /// Activates the given portfolio; no-op when the id is unknown.
    pub async fn switch_portfolio(&self, id: &str) {
        let switched = {
            let mut state = self.write_state();
            if state.portfolios.iter().any(|p| p.id == id) {
                state.current_portfolio_id = id.to_string();
                true
            } else {
                debug!("Ignoring switch to unknown portfolio {}", id);
                false
            }
        };
        if switched {
            self.persist().await;
        }
    }

    pub async fn delete_portfolio(&self, id: &str) -> Result<()> {
        {
            let mut state = self.write_state();
            if state.portfolios.len() <= 1 {
                return Err(PortfolioError::CannotDeleteLastPortfolio.into());
            }
            state.portfolios.retain(|p| p.id != id);
            state.ensure_active_portfolio();
        }
        self.persist().await;
        Ok(())
    }

    // --- Holdings ---

    /// Adds a position to the active portfolio, merging into an existing
    /// holding of the same ticker (exact, case-sensitive match) with a
    /// quantity-weighted average price. The addition is pushed to the
    /// backend best-effort.
    pub async fn add_asset(&self, draft: NewHolding) -> Result<Holding> {
        let (portfolio_id, holding) = {
            let mut state = self.write_state();
            let portfolio_id = state.current_portfolio_id.clone();
            let portfolio = state
                .active_portfolio_mut()
                .ok_or_else(|| PortfolioError::PortfolioNotFound(portfolio_id.clone()))?;

            let holding = match portfolio.find_holding_by_symbol_mut(&draft.symbol) {
                Some(existing) => {
                    existing.merge_new(&draft);
                    existing.clone()
                }
                None => {
                    let holding = Holding::from_new(draft);
                    portfolio.holdings.push(holding.clone());
                    holding
                }
            };
            Self::append_snapshot_locked(&mut state);
            (portfolio_id, holding)
        };

        if let Err(e) = self.remote.push_holding(&portfolio_id, &holding).await {
            warn!("Remote sync of holding addition failed: {}", e);
        }
        self.persist().await;
        Ok(holding)
    }

    /// Replaces the holding with the same id, re-deriving `total_value`.
    pub async fn update_asset(&self, holding: Holding) -> Result<Holding> {
        let updated = {
            let mut state = self.write_state();
            let portfolio_id = state.current_portfolio_id.clone();
            let portfolio = state
                .active_portfolio_mut()
                .ok_or(PortfolioError::PortfolioNotFound(portfolio_id))?;
            let slot = portfolio
                .find_holding_mut(&holding.id)
                .ok_or_else(|| PortfolioError::HoldingNotFound(holding.id.clone()))?;
            *slot = holding;
            slot.recompute_total();
            let updated = slot.clone();
            Self::append_snapshot_locked(&mut state);
            updated
        };
        self.persist().await;
        Ok(updated)
    }

    pub async fn remove_asset(&self, id: &str) {
        {
            let mut state = self.write_state();
            if let Some(portfolio) = state.active_portfolio_mut() {
                portfolio.holdings.retain(|h| h.id != id);
            }
            Self::append_snapshot_locked(&mut state);
        }
        self.persist().await;
    }

    /// Folds holdings sharing a ticker into the first-seen holding, using
    /// the same weighted-average rule as [`PortfolioService::add_asset`].
    pub async fn merge_duplicate_assets(&self) {
        {
            let mut state = self.write_state();
            if let Some(portfolio) = state.active_portfolio_mut() {
                let existing = std::mem::take(&mut portfolio.holdings);
                let mut merged: Vec<Holding> = Vec::with_capacity(existing.len());
                for holding in existing {
                    match merged.iter_mut().find(|h| h.symbol == holding.symbol) {
                        Some(first) => first.merge(
                            holding.quantity,
                            holding.cost_basis_price(),
                            holding.current_price,
                            holding.price_change,
                            holding.price_change_percent,
                        ),
                        None => merged.push(holding),
                    }
                }
                portfolio.holdings = merged;
            }
        }
        self.persist().await;
    }

    // --- Market data ---

    /// Remote asset search, degrading to the fixed offline catalog with
    /// placeholder prices.
    pub async fn search_assets(
        &self,
        query: &str,
        classes: Option<&[AssetClass]>,
    ) -> Vec<QuoteSummary> {
        with_remote_fallback(
            "Asset search",
            self.remote.search_assets(query, classes),
            || fallback_provider::search(query, classes),
        )
        .await
    }

    /// Refreshes every holding's price with one concurrent quote fetch per
    /// symbol. A failed fetch leaves that holding untouched; when the whole
    /// batch fails the simulated walk is applied to every holding instead.
    pub async fn refresh_prices(&self) {
        let symbols: Vec<String> = self
            .read_state()
            .active_portfolio()
            .map(|p| p.holdings.iter().map(|h| h.symbol.clone()).collect())
            .unwrap_or_default();

        let fetches = symbols.into_iter().map(|symbol| async move {
            let result = self.remote.get_latest_quote(&symbol).await;
            (symbol, result)
        });
        let results = futures::future::join_all(fetches).await;
        let all_failed = !results.is_empty() && results.iter().all(|(_, r)| r.is_err());

        let mut quotes: HashMap<String, PriceQuote> = HashMap::new();
        for (symbol, result) in results {
            match result {
                Ok(quote) => {
                    quotes.insert(symbol, quote);
                }
                Err(e) => debug!(
                    "Price fetch for {} failed, keeping previous price: {}",
                    symbol, e
                ),
            }
        }

        {
            let mut state = self.write_state();
            if let Some(portfolio) = state.active_portfolio_mut() {
                if all_failed {
                    warn!("Price refresh failed for the whole batch, applying simulated prices");
                    for holding in portfolio.holdings.iter_mut() {
                        let (price, change, change_percent) =
                            fallback_provider::simulated_walk(holding.current_price);
                        holding.apply_price(price, change, change_percent);
                    }
                } else {
                    // every holding with a fetched symbol, duplicates included
                    for holding in portfolio.holdings.iter_mut() {
                        if let Some(quote) = quotes.get(&holding.symbol) {
                            holding.apply_price(
                                quote.price,
                                quote.price_change,
                                quote.price_change_percent,
                            );
                        }
                    }
                }
            }
            state.last_refresh = Some(Utc::now());
            Self::append_snapshot_locked(&mut state);
        }
        self.persist().await;
    }

    // --- Valuation history ---

    /// Appends one valuation snapshot of the active portfolio and truncates
    /// the log to the most recent [`SNAPSHOT_HISTORY_LIMIT`] entries.
    pub async fn record_snapshot(&self) {
        {
            let mut state = self.write_state();
            Self::append_snapshot_locked(&mut state);
        }
        self.persist().await;
    }

    /// Pure read: chart points for the snapshots within the timeframe.
    pub fn get_performance_data(&self, timeframe: Timeframe) -> Vec<PerformancePoint> {
        let state = self.read_state();
        performance_points(&state.snapshots, timeframe, Utc::now())
    }

    // --- Backup ---

    pub fn export_data(&self) -> Result<String> {
        let state = self.read_state();
        let export = ExportData {
            portfolios: state.portfolios.clone(),
            snapshots: state.snapshots.clone(),
            export_date: Utc::now(),
            version: EXPORT_VERSION.to_string(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Replaces the in-memory portfolios and snapshots with the imported
    /// document. Both `portfolios` and `snapshots` arrays must be present;
    /// otherwise the import is rejected and prior state is untouched.
    pub async fn import_data(&self, json: &str) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| PortfolioError::InvalidFormat(format!("not valid JSON: {}", e)))?;

        let portfolios = value
            .get("portfolios")
            .filter(|v| v.is_array())
            .cloned()
            .ok_or_else(|| PortfolioError::InvalidFormat("missing 'portfolios' array".to_string()))?;
        let snapshots = value
            .get("snapshots")
            .filter(|v| v.is_array())
            .cloned()
            .ok_or_else(|| PortfolioError::InvalidFormat("missing 'snapshots' array".to_string()))?;

        let portfolios: Vec<Portfolio> = serde_json::from_value(portfolios)
            .map_err(|e| PortfolioError::InvalidFormat(e.to_string()))?;
        let snapshots: Vec<ValuationSnapshot> = serde_json::from_value(snapshots)
            .map_err(|e| PortfolioError::InvalidFormat(e.to_string()))?;

        {
            let mut state = self.write_state();
            state.portfolios = portfolios;
            state.snapshots = snapshots;
            state.ensure_active_portfolio();
        }
        self.persist().await;
        Ok(())
    }

    // --- Settings & read accessors ---

    pub fn api_settings(&self) -> (Option<String>, Option<String>) {
        let state = self.read_state();
        (state.api_base_url.clone(), state.api_key.clone())
    }

    pub async fn set_api_settings(&self, base_url: Option<String>, api_key: Option<String>) {
        {
            let mut state = self.write_state();
            state.api_base_url = base_url;
            state.api_key = api_key;
        }
        self.persist().await;
    }

    pub fn portfolios(&self) -> Vec<Portfolio> {
        self.read_state().portfolios.clone()
    }

    pub fn active_portfolio(&self) -> Option<Portfolio> {
        self.read_state().active_portfolio().cloned()
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.read_state()
            .active_portfolio()
            .map(|p| p.holdings.clone())
            .unwrap_or_default()
    }

    pub fn snapshots(&self) -> Vec<ValuationSnapshot> {
        self.read_state().snapshots.clone()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.read_state().last_refresh
    }
}
