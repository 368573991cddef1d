use anyhow::{Context, Result};
use gitflower_core::ports::{Clock, SystemClock};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

use crate::adapters::GitBackend;
use crate::cli::{Command, OutputFormat};
use crate::config::Config;
use crate::output::{self, Renderer};
use crate::store::RepoStore;

/// Runs one CLI command against the configured repository tree
pub struct App {
    config: Config,
    store: RepoStore,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = RepoStore::new(config.scan_config(), Arc::new(GitBackend::new()));
        Self {
            config,
            store,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Command output goes to `out`, scan warnings to `err`
    pub fn run<W: Write, E: Write>(&self, command: &Command, out: &mut W, err: &mut E) -> Result<()> {
        match command {
            Command::List { format, warnings } => self.list(*format, *warnings, out, err),
            Command::Create { path } => self.create(path, out),
            Command::Show { path, format } => self.show(path, *format, out),
            Command::Config => self.show_config(out),
        }
    }

    fn list<W: Write, E: Write>(
        &self,
        format: OutputFormat,
        show_warnings: bool,
        out: &mut W,
        err: &mut E,
    ) -> Result<()> {
        let result = self.store.scan().context("scanning repositories")?;

        if show_warnings && !result.warnings.is_empty() {
            writeln!(err, "Warnings:")?;
            for warning in &result.warnings {
                writeln!(err, "  - {warning}")?;
            }
            writeln!(err)?;
        }

        match format {
            OutputFormat::Table => {
                Renderer::new(self.clock.as_ref()).table(out, &result.repositories)
            }
            OutputFormat::Json => output::json(out, &result.repositories),
        }
    }

    fn create<W: Write>(&self, path: &str, out: &mut W) -> Result<()> {
        let created = self.store.create(path).context("creating repository")?;
        info!("Created {}", created.path.display());

        writeln!(out, "Created repository: {}", created.relative_path)?;
        writeln!(out)?;
        writeln!(out, "To push to this repository:")?;
        writeln!(out, "  git remote add origin {}", created.path.display())?;
        writeln!(out, "  git push -u origin {}", self.config.repos.default_branch)?;
        Ok(())
    }

    fn show<W: Write>(&self, path: &str, format: OutputFormat, out: &mut W) -> Result<()> {
        let record = self
            .store
            .get(path)
            .with_context(|| format!("invalid repository path '{path}'"))?;

        match format {
            OutputFormat::Table => Renderer::new(self.clock.as_ref()).detail(out, &record),
            OutputFormat::Json => output::json(out, &record),
        }
    }

    fn show_config<W: Write>(&self, out: &mut W) -> Result<()> {
        let repos = &self.config.repos;
        writeln!(out, "Repositories directory: {}", repos.directory.display())?;
        match repos.scan_depth {
            Some(depth) => writeln!(out, "Scan depth: {depth}")?,
            None => writeln!(out, "Scan depth: unlimited")?,
        }
        writeln!(out, "Default branch: {}", repos.default_branch)?;
        writeln!(out, "Log level: {}", self.config.log.level)?;
        Ok(())
    }
}
