use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use assetfolio_core::holdings::{AssetClass, Holding};
use assetfolio_core::market_data::{MarketDataError, PriceQuote, QuoteSummary, RemoteApiTrait};
use assetfolio_core::storage::{AppState, StateStoreTrait, StorageError};

/// In-memory store recording every save, standing in for the platform
/// key-value storage.
#[derive(Default)]
pub struct MemoryStore {
    initial: RwLock<Option<AppState>>,
    saves: RwLock<Vec<AppState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(state: AppState) -> Self {
        let store = Self::default();
        *store.initial.write().unwrap() = Some(state);
        store
    }

    pub fn save_count(&self) -> usize {
        self.saves.read().unwrap().len()
    }

    pub fn last_saved(&self) -> Option<AppState> {
        self.saves.read().unwrap().last().cloned()
    }
}

#[async_trait]
impl StateStoreTrait for MemoryStore {
    async fn load(&self) -> Result<Option<AppState>, StorageError> {
        Ok(self.initial.read().unwrap().clone())
    }

    async fn save(&self, state: &AppState) -> Result<(), StorageError> {
        self.saves.write().unwrap().push(state.clone());
        Ok(())
    }
}

/// Scripted backend: each call answers from the configured data or fails,
/// so tests can drive both the remote and the fallback paths.
#[derive(Default)]
pub struct MockRemoteApi {
    portfolio_id: RwLock<Option<String>>,
    quotes: RwLock<HashMap<String, PriceQuote>>,
    search_results: RwLock<Option<Vec<QuoteSummary>>>,
    pushed: RwLock<Vec<(String, Holding)>>,
}

impl MockRemoteApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend where every call fails.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_portfolio_id(self, id: &str) -> Self {
        *self.portfolio_id.write().unwrap() = Some(id.to_string());
        self
    }

    pub fn with_quote(self, symbol: &str, price: PriceQuote) -> Self {
        self.quotes.write().unwrap().insert(symbol.to_string(), price);
        self
    }

    pub fn with_search_results(self, results: Vec<QuoteSummary>) -> Self {
        *self.search_results.write().unwrap() = Some(results);
        self
    }

    pub fn pushed_holdings(&self) -> Vec<(String, Holding)> {
        self.pushed.read().unwrap().clone()
    }
}

#[async_trait]
impl RemoteApiTrait for MockRemoteApi {
    async fn create_portfolio(&self, _name: &str) -> Result<String, MarketDataError> {
        self.portfolio_id
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| MarketDataError::ProviderError("backend unreachable".to_string()))
    }

    async fn push_holding(
        &self,
        portfolio_id: &str,
        holding: &Holding,
    ) -> Result<(), MarketDataError> {
        if self.portfolio_id.read().unwrap().is_none() {
            return Err(MarketDataError::ProviderError(
                "backend unreachable".to_string(),
            ));
        }
        self.pushed
            .write()
            .unwrap()
            .push((portfolio_id.to_string(), holding.clone()));
        Ok(())
    }

    async fn search_assets(
        &self,
        _query: &str,
        _classes: Option<&[AssetClass]>,
    ) -> Result<Vec<QuoteSummary>, MarketDataError> {
        self.search_results
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| MarketDataError::ProviderError("backend unreachable".to_string()))
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
        self.quotes
            .read()
            .unwrap()
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::NotFound(symbol.to_string()))
    }
}
