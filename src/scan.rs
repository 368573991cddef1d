use crate::metadata::MetadataExtractor;
use gitflower_core::domain::{classify, EntryKind, ScanConfig, ScanResult};
use gitflower_core::error::ScanError;
use gitflower_core::ports::RepoBackend;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Walks the repository tree below a configured root.
///
/// The scan is a single pre-order traversal in file-name order. Organization
/// folders are descended into, repository leaves are handed to the
/// [`MetadataExtractor`] and never entered, and a directory with an invalid
/// name is reported once and not entered either. The scanner keeps no state
/// between calls besides its configuration.
pub struct Scanner {
    config: ScanConfig,
    extractor: MetadataExtractor,
}

impl Scanner {
    pub fn new(config: ScanConfig, backend: Arc<dyn RepoBackend>) -> Self {
        Self {
            config,
            extractor: MetadataExtractor::new(backend),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn extractor(&self) -> &MetadataExtractor {
        &self.extractor
    }

    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        let mut result = ScanResult::new();

        let root = std::path::absolute(&self.config.root).map_err(|source| ScanError::Access {
            path: self.config.root.clone(),
            source,
        })?;

        match fs::metadata(&root) {
            Ok(metadata) if !metadata.is_dir() => {
                return Err(ScanError::NotADirectory { path: root });
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Repos directory {} does not exist yet", root.display());
                return Ok(result);
            }
            Err(source) => return Err(ScanError::Access { path: root, source }),
        }

        // Fail here rather than burying an unreadable root in the warnings
        fs::read_dir(&root).map_err(|source| ScanError::Access {
            path: root.clone(),
            source,
        })?;

        info!("Scanning repositories in {}", root.display());

        let mut walker = WalkDir::new(&root).min_depth(1).sort_by_file_name();
        if let Some(max_depth) = self.config.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut entries = walker.into_iter();
        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root.as_path()).to_path_buf();
                    result
                        .warnings
                        .push(format!("Error accessing {}: {}", path.display(), e));
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            let Some(name) = entry.file_name().to_str() else {
                result.warnings.push(format!(
                    "Invalid directory name: {} (not valid UTF-8)",
                    path.display()
                ));
                entries.skip_current_dir();
                continue;
            };

            match classify(name) {
                Ok(EntryKind::Repository) => {
                    let relative = relative_path(&root, path);
                    debug!("Found repository {}", relative);
                    result
                        .repositories
                        .push(self.extractor.extract(path, &relative));
                    entries.skip_current_dir();
                }
                Ok(EntryKind::OrgFolder) => {
                    debug!("Descending into organization folder {}", path.display());
                }
                Err(e) => {
                    result
                        .warnings
                        .push(format!("Invalid directory name: {} ({})", path.display(), e));
                    entries.skip_current_dir();
                }
            }
        }

        info!(
            "Scan found {} repositories with {} warnings",
            result.repositories.len(),
            result.warnings.len()
        );

        Ok(result)
    }
}

/// `path` relative to `root`, always joined with `/`
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Absolute path of a repository given its relative path
pub fn absolute_repo_path(root: &Path, relative: &str) -> PathBuf {
    gitflower_core::domain::path_components(relative)
        .into_iter()
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::GitBackend;
    use anyhow::Result;
    use tempfile::TempDir;

    fn scanner(root: &Path) -> Scanner {
        Scanner::new(ScanConfig::new(root), Arc::new(GitBackend::new()))
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/base");
        assert_eq!(relative_path(root, Path::new("/base/repo.git")), "repo.git");
        assert_eq!(
            relative_path(root, Path::new("/base/org/team/repo.git")),
            "org/team/repo.git"
        );
    }

    #[test]
    fn test_absolute_repo_path() {
        let root = Path::new("/base");
        assert_eq!(
            absolute_repo_path(root, "org/repo.git"),
            PathBuf::from("/base/org/repo.git")
        );
        // A leading separator must not replace the root
        assert_eq!(
            absolute_repo_path(root, "/org/repo.git"),
            PathBuf::from("/base/org/repo.git")
        );
    }

    #[test]
    fn test_scan_missing_root() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let result = scanner(&temp_dir.path().join("nope")).scan()?;
        assert!(result.is_empty());
        Ok(())
    }

    #[test]
    fn test_scan_root_is_a_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file = temp_dir.path().join("repos");
        fs::write(&file, "not a directory")?;

        let err = scanner(&file).scan().unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
        Ok(())
    }

    #[test]
    fn test_scan_empty_root() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let result = scanner(temp_dir.path()).scan()?;
        assert!(result.is_empty());
        Ok(())
    }

    #[test]
    fn test_scan_ignores_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("README"), "hello")?;
        fs::write(temp_dir.path().join("NOTES.txt"), "files are never classified")?;

        let result = scanner(temp_dir.path()).scan()?;
        assert!(result.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_name_is_not_descended() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("Bad_Org").join("inner.git"))?;

        let result = scanner(temp_dir.path()).scan()?;
        assert!(result.repositories.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Bad_Org"));
        Ok(())
    }

    #[test]
    fn test_max_depth_limits_traversal() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("top.git"))?;
        fs::create_dir_all(temp_dir.path().join("a").join("b").join("deep.git"))?;

        let config = ScanConfig::new(temp_dir.path()).with_max_depth(Some(2));
        let result = Scanner::new(config, Arc::new(GitBackend::new())).scan()?;

        let paths: Vec<&str> = result
            .repositories
            .iter()
            .map(|r| r.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["top.git"]);
        assert!(result.warnings.is_empty());
        Ok(())
    }
}
