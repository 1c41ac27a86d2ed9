mod config;
mod db;
mod error;
mod files;
mod import;
mod models;
mod run;
mod services;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    setup_logging();

    let run::Cli {
        db: db_path,
        upload_dir,
        command,
    } = run::Cli::parse();
    let config = config::Config::resolve(db_path, upload_dir)?;
    let mut db = db::Database::open(&config.db_path)
        .with_context(|| format!("Failed to open database: {}", config.db_path.display()))?;

    run::as_cli(command, &config, &mut db)
}

/// Log to stderr, filtered by `RUST_LOG` (warnings and errors by default).
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
