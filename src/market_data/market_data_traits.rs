use async_trait::async_trait;

use super::market_data_errors::MarketDataError;
use super::market_data_model::{PriceQuote, QuoteSummary};
use crate::holdings::{AssetClass, Holding};

/// Client boundary to the backend API. Every call is fallible; callers are
/// expected to degrade to local behavior on any error.
#[async_trait]
pub trait RemoteApiTrait: Send + Sync {
    /// Creates a portfolio remotely and returns its server-assigned id.
    async fn create_portfolio(&self, name: &str) -> Result<String, MarketDataError>;

    /// Mirrors a holding addition to the backend.
    async fn push_holding(
        &self,
        portfolio_id: &str,
        holding: &Holding,
    ) -> Result<(), MarketDataError>;

    async fn search_assets(
        &self,
        query: &str,
        classes: Option<&[AssetClass]>,
    ) -> Result<Vec<QuoteSummary>, MarketDataError>;

    async fn get_latest_quote(&self, symbol: &str) -> Result<PriceQuote, MarketDataError>;
}
