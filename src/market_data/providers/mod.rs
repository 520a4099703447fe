pub mod api_provider;
pub mod fallback_provider;
