use anyhow::{Context, Result};
use git2::{Repository as GitRepository, Sort};
use gitflower_core::domain::{Reference, Timestamp};
use gitflower_core::ports::{RepoBackend, RepoHandle};
use std::path::Path;
use tracing::debug;

/// Git backend that implements RepoBackend using git2
#[derive(Debug, Default, Clone, Copy)]
pub struct GitBackend;

impl GitBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RepoBackend for GitBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn RepoHandle>> {
        // Plain open: never search parent directories, a leaf either is a
        // repository itself or it isn't one.
        let repo = GitRepository::open(path)
            .with_context(|| format!("Failed to open git repository at {}", path.display()))?;
        Ok(Box::new(GitHandle { repo }))
    }

    fn init_bare(&self, path: &Path) -> Result<()> {
        GitRepository::init_bare(path).with_context(|| {
            format!("Failed to initialize bare repository at {}", path.display())
        })?;
        Ok(())
    }
}

/// An opened git2 repository
pub struct GitHandle {
    repo: GitRepository,
}

impl RepoHandle for GitHandle {
    fn references(&self) -> Result<Vec<Reference>> {
        let mut references = Vec::new();

        for reference in self.repo.references().context("Failed to list references")? {
            let reference = reference.context("Failed to read reference")?;
            let Some(name) = reference.name() else {
                // Non UTF-8 reference names can't belong to any namespace we count
                continue;
            };

            references.push(Reference::new(name));
        }

        Ok(references)
    }

    fn commit_times(&self, limit: usize) -> Result<Vec<Timestamp>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;

        // Every reference, not just HEAD: a bare repository's HEAD may point
        // at a branch that was never pushed. A reference whose target is
        // missing or not a commit only loses its own history.
        for reference in self.repo.references().context("Failed to list references")? {
            let reference = match reference {
                Ok(reference) => reference,
                Err(e) => {
                    debug!("Skipping unreadable reference: {}", e);
                    continue;
                }
            };

            match reference.peel_to_commit() {
                Ok(commit) => revwalk.push(commit.id())?,
                Err(e) => debug!(
                    "Skipping reference {} in history walk: {}",
                    String::from_utf8_lossy(reference.name_bytes()),
                    e
                ),
            }
        }

        let mut times = Vec::new();
        for oid in revwalk.take(limit) {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let when = commit.committer().when();
            times.push(Timestamp::new(when.seconds(), when.offset_minutes()));
        }

        Ok(times)
    }
}
