//! GitFlower Core - Pure domain logic with no I/O dependencies
//!
//! This crate contains the naming grammar, the repository record types, the
//! error taxonomy and the ports (interfaces) for GitFlower. It never touches
//! the filesystem or a Git library itself - those are handled by adapters in
//! the application crate.

pub mod domain;
pub mod ports;
pub mod error;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
