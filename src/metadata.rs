use anyhow::Result;
use gitflower_core::domain::{RepoRecord, Timestamp};
use gitflower_core::ports::{RepoBackend, RepoHandle};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

/// Computes the per-repository metrics of a [`RepoRecord`].
///
/// Never fails outward: an unopenable repository yields an invalid record, and
/// every metric falls back to its zero value on its own error without
/// affecting the others.
#[derive(Clone)]
pub struct MetadataExtractor {
    backend: Arc<dyn RepoBackend>,
}

impl MetadataExtractor {
    pub fn new(backend: Arc<dyn RepoBackend>) -> Self {
        Self { backend }
    }

    pub fn extract(&self, path: &Path, relative_path: &str) -> RepoRecord {
        let record = RepoRecord::new(path, relative_path);

        let handle = match self.backend.open(path) {
            Ok(handle) => handle,
            Err(e) => {
                debug!("{} is not a valid repository: {:#}", path.display(), e);
                return record.into_invalid(format!("not a valid git repository: {e:#}"));
            }
        };

        let references = metric(path, "references", || handle.references());

        RepoRecord {
            size: directory_size(path),
            last_update: metric(path, "last update", || latest_commit(handle.as_ref())),
            branch_count: references.iter().filter(|r| r.is_branch()).count(),
            mr_count: references.iter().filter(|r| r.is_merge_request()).count(),
            ..record
        }
    }
}

fn latest_commit(handle: &dyn RepoHandle) -> Result<Option<Timestamp>> {
    Ok(handle.commit_times(1)?.into_iter().next())
}

/// Run one metric computation, defaulting to the zero value on error
fn metric<T: Default>(path: &Path, what: &str, compute: impl FnOnce() -> Result<T>) -> T {
    compute().unwrap_or_else(|e| {
        debug!("Failed to read {} of {}: {:#}", what, path.display(), e);
        T::default()
    })
}

/// Sum of regular file sizes below `path`; unreadable entries count as zero
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}
