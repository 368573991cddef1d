use crate::scan::absolute_repo_path;
use gitflower_core::domain::{canonical_repo_path, validate_path};
use gitflower_core::error::CreateError;
use gitflower_core::ports::RepoBackend;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A freshly created repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRepo {
    /// Canonical `org/.../name.git` path below the root
    pub relative_path: String,
    pub path: PathBuf,
}

/// Materializes new empty bare repositories in the tree.
///
/// Callers that can run concurrently must serialize `create` themselves; see
/// [`crate::store::RepoStore`].
pub struct Creator {
    root: PathBuf,
    backend: Arc<dyn RepoBackend>,
}

impl Creator {
    pub fn new(root: impl Into<PathBuf>, backend: Arc<dyn RepoBackend>) -> Self {
        Self {
            root: root.into(),
            backend,
        }
    }

    pub fn create(&self, path: &str) -> Result<CreatedRepo, CreateError> {
        let relative_path = canonical_repo_path(path)?;
        validate_path(&relative_path)?;

        let full_path = absolute_repo_path(&self.root, &relative_path);

        // symlink_metadata so that a dangling link still counts as taken
        if fs::symlink_metadata(&full_path).is_ok() {
            return Err(CreateError::AlreadyExists {
                path: relative_path,
            });
        }

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| CreateError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::create_dir(&full_path).map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                CreateError::AlreadyExists {
                    path: relative_path.clone(),
                }
            } else {
                CreateError::Io {
                    path: full_path.clone(),
                    source,
                }
            }
        })?;

        if let Err(source) = self.backend.init_bare(&full_path) {
            // Only the leaf is ours to remove; parents may hold sibling repositories.
            match fs::remove_dir_all(&full_path) {
                Ok(()) => debug!("Rolled back {}", full_path.display()),
                Err(e) => warn!("Failed to remove {} after failed init: {}", full_path.display(), e),
            }
            return Err(CreateError::InitFailure {
                path: relative_path,
                source,
            });
        }

        info!("Created repository {}", relative_path);

        Ok(CreatedRepo {
            relative_path,
            path: full_path,
        })
    }
}
