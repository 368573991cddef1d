use anyhow::{Context, Result};
use directories::ProjectDirs;
use gitflower_core::domain::ScanConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::CliArgs;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    pub repos: ReposConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ReposConfig {
    pub directory: PathBuf,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    /// Deepest directory level scanned below `directory`; unbounded when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_depth: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct LogConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub level: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            repos: ReposConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ReposConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./repos/"),
            default_branch: default_branch(),
            scan_depth: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "gitflower")
        .context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("gitflower.toml"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn from_cli_and_file(cli_args: &CliArgs) -> Result<Self> {
        let mut config = Self::load(cli_args.config.clone())?;

        // CLI args (and their env fallbacks) override config file
        if let Some(repos_dir) = &cli_args.repos_dir {
            config.repos.directory = repos_dir.clone();
        }

        Ok(config)
    }

    /// Settings handed to the scanner and creator
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            root: self.repos.directory.clone(),
            default_branch: self.repos.default_branch.clone(),
            max_depth: self.repos.scan_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.repos.directory, PathBuf::from("./repos/"));
        assert_eq!(config.repos.default_branch, "main");
        assert_eq!(config.repos.scan_depth, None);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_config_serialization_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.repos.directory = PathBuf::from("/srv/git");
        config.repos.scan_depth = Some(3);
        config.log.level = "debug".to_string();

        let toml_str = toml::to_string(&config)?;
        let parsed_config: Config = toml::from_str(&toml_str)?;

        assert_eq!(config, parsed_config);
        Ok(())
    }

    #[test]
    fn test_config_minimal_file_uses_defaults() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
            version = 1
            [repos]
            directory = "/srv/git"
            "#,
        )?;

        assert_eq!(config.repos.directory, PathBuf::from("/srv/git"));
        assert_eq!(config.repos.default_branch, "main");
        assert_eq!(config.repos.scan_depth, None);
        assert_eq!(config.log, LogConfig::default());
        Ok(())
    }

    #[test]
    fn test_config_load_nonexistent_creates_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("gitflower.toml");

        let config = Config::load(Some(config_path.clone()))?;

        assert_eq!(config, Config::default());
        assert!(config_path.exists());

        Ok(())
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");

        let mut config = Config::default();
        config.repos.directory = PathBuf::from("/custom/path");
        config.repos.default_branch = "trunk".to_string();

        config.save(&config_path)?;
        let loaded_config = Config::load(Some(config_path))?;

        assert_eq!(config, loaded_config);

        Ok(())
    }

    #[test]
    fn test_config_invalid_toml() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "version = ")?;

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }

    #[test]
    fn test_cli_override() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");

        let mut original_config = Config::default();
        original_config.repos.directory = PathBuf::from("/original/path");
        original_config.save(&config_path)?;

        let cli_args = CliArgs {
            config: Some(config_path),
            repos_dir: Some(PathBuf::from("/override/path")),
            command: Command::Config,
        };

        // CLI should override
        let final_config = Config::from_cli_and_file(&cli_args)?;
        assert_eq!(final_config.repos.directory, PathBuf::from("/override/path"));

        Ok(())
    }

    #[test]
    fn test_scan_config() {
        let mut config = Config::default();
        config.repos.scan_depth = Some(4);

        let scan = config.scan_config();
        assert_eq!(scan.root, PathBuf::from("./repos/"));
        assert_eq!(scan.default_branch, "main");
        assert_eq!(scan.max_depth, Some(4));
    }

    #[test]
    fn test_get_default_config_path() -> Result<()> {
        let path = get_default_config_path()?;
        assert!(path.ends_with("gitflower.toml"));
        Ok(())
    }
}
