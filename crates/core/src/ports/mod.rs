pub mod backend;
pub mod time;

// Re-exports
pub use backend::*;
pub use time::*;
