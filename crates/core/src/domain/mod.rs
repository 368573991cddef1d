pub mod naming;
pub mod repo;
pub mod commit;

// Re-exports for convenience
pub use naming::*;
pub use repo::*;
pub use commit::*;
