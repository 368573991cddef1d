use super::commit::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One discovered repository.
///
/// A record exists for every directory classified as a repository, whether or
/// not the backend could open it. Unopenable repositories keep their zeroed
/// metrics and carry a diagnostic in `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoRecord {
    pub path: PathBuf,
    pub name: String,
    pub relative_path: String,
    pub size: u64,
    pub last_update: Option<Timestamp>,
    pub branch_count: usize,
    pub mr_count: usize,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepoRecord {
    /// A valid record with zeroed metrics, ready to be filled in
    pub fn new(path: &Path, relative_path: impl Into<String>) -> Self {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Self {
            path: path.to_path_buf(),
            name,
            relative_path: relative_path.into(),
            size: 0,
            last_update: None,
            branch_count: 0,
            mr_count: 0,
            is_valid: true,
            error: None,
        }
    }

    /// Mark the record as unopenable. Metrics are reset to their zero value.
    pub fn into_invalid(self, error: impl Into<String>) -> Self {
        Self {
            size: 0,
            last_update: None,
            branch_count: 0,
            mr_count: 0,
            is_valid: false,
            error: Some(error.into()),
            ..self
        }
    }
}

/// Output of one scan: repositories in traversal order plus the warnings
/// collected on the way. Both are rebuilt from scratch by every scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub repositories: Vec<RepoRecord>,
    pub warnings: Vec<String>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty() && self.warnings.is_empty()
    }

    pub fn find(&self, relative_path: &str) -> Option<&RepoRecord> {
        self.repositories
            .iter()
            .find(|repo| repo.relative_path == relative_path)
    }
}

/// Settings the scanner and creator are constructed with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root of the repository tree
    pub root: PathBuf,
    /// Only used for advisory messages, never for scan logic
    pub default_branch: String,
    /// Deepest level visited below the root (1 = direct children); unbounded when `None`
    pub max_depth: Option<usize>,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./repos/"),
            default_branch: "main".to_string(),
            max_depth: None,
        }
    }
}
