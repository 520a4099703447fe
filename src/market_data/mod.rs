pub(crate) mod market_data_errors;
pub(crate) mod market_data_model;
pub(crate) mod market_data_traits;
pub(crate) mod providers;

// Re-export the public interface
pub use market_data_model::{PriceQuote, QuoteSummary};
pub use market_data_traits::RemoteApiTrait;

pub use providers::api_provider::ApiProvider;
pub use providers::fallback_provider;

// Re-export error types for convenience
pub use market_data_errors::MarketDataError;
