use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Cannot delete the last portfolio")]
    CannotDeleteLastPortfolio,

    #[error("Portfolio not found: {0}")]
    PortfolioNotFound(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Invalid import format: {0}")]
    InvalidFormat(String),
}
