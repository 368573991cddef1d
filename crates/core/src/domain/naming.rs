//! Naming grammar for the repository tree.
//!
//! Every directory below the repos root is either an organization folder
//! (pure grouping) or a repository leaf. Both use the same "slug" alphabet:
//! lowercase ASCII letters, digits, hyphens and dots. Repository leaves carry
//! the [`REPO_SUFFIX`], organization folders never do.

use crate::error::NameError;

/// Marker suffix that turns a slug into a repository leaf
pub const REPO_SUFFIX: &str = ".git";

/// Longest segment accepted anywhere in the tree
pub const MAX_NAME_LEN: usize = 100;

/// What a valid directory name denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Repository,
    OrgFolder,
}

/// Check a single segment against the slug grammar
pub fn validate_slug(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    if name.len() > MAX_NAME_LEN {
        return Err(NameError::TooLong {
            name: name.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    if name == "." || name == ".." {
        return Err(NameError::Reserved {
            name: name.to_string(),
        });
    }

    if name.starts_with('.') {
        return Err(NameError::LeadingDot {
            name: name.to_string(),
        });
    }

    if name.contains("..") {
        return Err(NameError::DoubleDot {
            name: name.to_string(),
        });
    }

    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.';
    if !name.chars().all(allowed) {
        return Err(NameError::InvalidCharacters {
            name: name.to_string(),
        });
    }

    Ok(())
}

pub fn is_repository_name(name: &str) -> bool {
    name.ends_with(REPO_SUFFIX)
}

/// Slug that ends with the repository suffix
pub fn validate_repository_name(name: &str) -> Result<(), NameError> {
    validate_slug(name)?;

    // ".git" alone already failed the leading-dot rule, so the stem is never empty.
    if !is_repository_name(name) {
        return Err(NameError::MissingSuffix {
            name: name.to_string(),
            suffix: REPO_SUFFIX,
        });
    }

    Ok(())
}

/// Slug that does not end with the repository suffix
pub fn validate_org_folder(name: &str) -> Result<(), NameError> {
    validate_slug(name)?;

    if is_repository_name(name) {
        return Err(NameError::UnexpectedSuffix {
            name: name.to_string(),
            suffix: REPO_SUFFIX,
        });
    }

    Ok(())
}

/// Classify a directory name found while walking the tree
pub fn classify(name: &str) -> Result<EntryKind, NameError> {
    if is_repository_name(name) {
        validate_repository_name(name)?;
        Ok(EntryKind::Repository)
    } else {
        validate_org_folder(name)?;
        Ok(EntryKind::OrgFolder)
    }
}

/// Non-empty components of a path, split on any platform separator
pub fn path_components(path: &str) -> Vec<&str> {
    path.split(std::path::is_separator)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Validate a full `org/.../leaf.git` path.
///
/// Empty components (leading, trailing or doubled separators) are skipped.
/// Every remaining component but the last must be an organization folder,
/// the last one must be a repository name. The first offending component is
/// reported.
pub fn validate_path(path: &str) -> Result<(), NameError> {
    let parts = path_components(path);
    let Some((leaf, orgs)) = parts.split_last() else {
        return Err(NameError::EmptyPath);
    };

    for org in orgs {
        validate_org_folder(org)?;
    }

    validate_repository_name(leaf)
}

/// Normalize a requested repository path: drop empty components, join with
/// `/` and append the repository suffix when it is missing.
pub fn canonical_repo_path(path: &str) -> Result<String, NameError> {
    let parts = path_components(path);
    if parts.is_empty() {
        return Err(NameError::EmptyPath);
    }

    let mut canonical = parts.join("/");
    if !is_repository_name(&canonical) {
        canonical.push_str(REPO_SUFFIX);
    }
    Ok(canonical)
}
