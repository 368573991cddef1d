use crate::domain::{Reference, Timestamp};
use anyhow::Result;
use std::path::Path;

/// Port for the version-control backend.
///
/// The scanner and creator only ever talk to a repository through this trait;
/// exactly one concrete adapter (git2) ships with the application, test
/// doubles implement it to inject failures.
pub trait RepoBackend: Send + Sync {
    /// Open an existing repository at `path`
    fn open(&self, path: &Path) -> Result<Box<dyn RepoHandle>>;

    /// Initialize an empty bare repository in the existing directory `path`
    fn init_bare(&self, path: &Path) -> Result<()>;
}

/// An opened repository
pub trait RepoHandle {
    /// Every reference in the repository (branches, tags, custom namespaces)
    fn references(&self) -> Result<Vec<Reference>>;

    /// Committer times of commits reachable from any reference, newest first,
    /// at most `limit` of them. Empty for a repository without commits.
    fn commit_times(&self, limit: usize) -> Result<Vec<Timestamp>>;
}
