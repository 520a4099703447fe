pub mod fallback;

pub use fallback::with_remote_fallback;
