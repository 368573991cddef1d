use std::path::PathBuf;
use thiserror::Error;

/// A path segment that violates the naming grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,

    #[error("path cannot be empty")]
    EmptyPath,

    #[error("invalid name '{name}': too long (max {max} characters)")]
    TooLong { name: String, max: usize },

    #[error("invalid name '{name}': cannot use special directory names")]
    Reserved { name: String },

    #[error("invalid name '{name}': cannot start with a dot")]
    LeadingDot { name: String },

    #[error("invalid name '{name}': cannot contain '..'")]
    DoubleDot { name: String },

    #[error("invalid name '{name}': must contain only lowercase letters, numbers, hyphens, and dots")]
    InvalidCharacters { name: String },

    #[error("repository name '{name}' must end with {suffix}")]
    MissingSuffix { name: String, suffix: &'static str },

    #[error("organization folder '{name}' must not end with {suffix}")]
    UnexpectedSuffix { name: String, suffix: &'static str },
}

impl NameError {
    /// The offending path segment, when the error concerns a single segment
    pub fn segment(&self) -> Option<&str> {
        match self {
            NameError::Empty | NameError::EmptyPath => None,
            NameError::TooLong { name, .. }
            | NameError::Reserved { name }
            | NameError::LeadingDot { name }
            | NameError::DoubleDot { name }
            | NameError::InvalidCharacters { name }
            | NameError::MissingSuffix { name, .. }
            | NameError::UnexpectedSuffix { name, .. } => Some(name),
        }
    }
}

/// Fatal scan failures. Everything below the root is downgraded to a warning.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("accessing repos directory {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("repos directory {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },
}

/// Repository creation failures
#[derive(Error, Debug)]
pub enum CreateError {
    #[error(transparent)]
    InvalidName(#[from] NameError),

    #[error("repository {path} already exists")]
    AlreadyExists { path: String },

    #[error("creating {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("initializing repository {path}: {source:#}")]
    InitFailure {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}
