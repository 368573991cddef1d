//! GitFlower application library
//!
//! Adapters and services on top of `gitflower-core`: the git2 backend, the
//! tree scanner, the repository creator and the thin CLI glue around them.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod create;
pub mod metadata;
pub mod output;
pub mod scan;
pub mod store;
