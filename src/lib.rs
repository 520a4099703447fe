pub mod constants;
pub mod errors;
pub mod holdings;
pub mod market_data;
pub mod portfolio;
pub mod storage;
pub mod utils;

pub use errors::{Error, Result};
pub use holdings::*;
pub use portfolio::*;
