pub mod snapshot_model;

pub use snapshot_model::ValuationSnapshot;
