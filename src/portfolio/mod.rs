pub mod performance;
pub mod portfolio_errors;
pub mod portfolio_model;
pub mod portfolio_service;
pub mod snapshot;

pub use performance::{PerformancePoint, Timeframe};
pub use portfolio_errors::PortfolioError;
pub use portfolio_model::{ExportData, Portfolio};
pub use portfolio_service::PortfolioService;
pub use snapshot::ValuationSnapshot;
