pub const DECIMAL_PRECISION: u32 = 8;

/// Valuation history is capped to roughly one year of daily snapshots.
pub const SNAPSHOT_HISTORY_LIMIT: usize = 365;

/// Fixed key the persisted state snapshot is stored under.
pub const STORAGE_FILE_NAME: &str = "assetfolio_store.json";

pub const EXPORT_VERSION: &str = "1.0";

pub const DEFAULT_PORTFOLIO_NAME: &str = "My Portfolio";
