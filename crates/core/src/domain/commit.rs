use serde::{Deserialize, Serialize};

/// Committer timestamp (Unix timestamp with timezone offset in minutes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamp {
    pub seconds: i64,
    pub offset_minutes: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, offset_minutes: i32) -> Self {
        Self {
            seconds,
            offset_minutes,
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Simple display - adapters can do more sophisticated formatting
        write!(f, "{}", self.seconds)
    }
}

/// A reference as listed by the backend, by its full name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
}

impl Reference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is_branch(&self) -> bool {
        self.name.starts_with(BRANCH_PREFIX)
    }

    pub fn is_merge_request(&self) -> bool {
        self.name.starts_with(MERGE_REQUEST_PREFIX)
    }
}

/// Namespace of ordinary branches
pub const BRANCH_PREFIX: &str = "refs/heads/";

/// Custom namespace holding merge-request references
pub const MERGE_REQUEST_PREFIX: &str = "refs/gitflower/merge-requests/";
