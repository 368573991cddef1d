use anyhow::Result;
use clap::Parser;
use gitflower::app::App;
use gitflower::cli::CliArgs;
use gitflower::config::Config;
use std::io;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = Config::from_cli_and_file(&args)?;

    // RUST_LOG wins over the configured level; logs go to stderr so stdout
    // stays machine readable.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!("Using repositories directory {}", config.repos.directory.display());

    let app = App::new(config);
    let res = app.run(&args.command, &mut io::stdout().lock(), &mut io::stderr().lock());

    if let Err(err) = &res {
        error!("Command failed: {:#}", err);
    }

    res
}
