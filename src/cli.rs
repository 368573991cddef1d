use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gitflower")]
#[command(about = "Discover, validate and create bare Git repositories in a nested directory tree")]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short = 'c', long, env = "GITFLOWER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Repositories directory (overrides config)
    #[arg(short = 'r', long, env = "GITFLOWER_REPOS", global = true)]
    pub repos_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List all repositories
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show scan warnings on stderr
        #[arg(short, long)]
        warnings: bool,
    },

    /// Create a new bare repository, e.g. `myorg/myproject.git`
    Create {
        /// Repository path below the repos directory (.git is appended if missing)
        path: String,
    },

    /// Show a single repository
    Show {
        /// Repository path below the repos directory
        path: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Config,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}
