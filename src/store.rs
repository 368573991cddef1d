use crate::create::{CreatedRepo, Creator};
use crate::scan::{absolute_repo_path, Scanner};
use gitflower_core::domain::{canonical_repo_path, validate_path, RepoRecord, ScanConfig, ScanResult};
use gitflower_core::error::{CreateError, NameError, ScanError};
use gitflower_core::ports::RepoBackend;
use std::sync::{Arc, Mutex};

/// Entry point for the CLI: scan, look up and create repositories under one root.
///
/// Scans may run concurrently with each other. Creates issued through the same
/// store are serialized; coordination across processes is out of reach here.
pub struct RepoStore {
    scanner: Scanner,
    creator: Creator,
    write_lock: Mutex<()>,
}

impl RepoStore {
    pub fn new(config: ScanConfig, backend: Arc<dyn RepoBackend>) -> Self {
        let creator = Creator::new(config.root.clone(), Arc::clone(&backend));
        Self {
            scanner: Scanner::new(config, backend),
            creator,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        self.scanner.config()
    }

    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        self.scanner.scan()
    }

    /// Metadata of a single repository, without scanning the whole tree
    pub fn get(&self, path: &str) -> Result<RepoRecord, NameError> {
        let relative = canonical_repo_path(path)?;
        validate_path(&relative)?;

        let full_path = absolute_repo_path(&self.config().root, &relative);
        Ok(self.scanner.extractor().extract(&full_path, &relative))
    }

    pub fn create(&self, path: &str) -> Result<CreatedRepo, CreateError> {
        // A poisoned lock only means another create panicked; the tree itself
        // is still consistent thanks to the creator's rollback.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.creator.create(path)
    }
}
