pub mod performance_model;

pub use performance_model::{performance_points, PerformancePoint, Timeframe};
