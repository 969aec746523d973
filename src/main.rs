mod cli;
mod color;
mod config;
mod db;
mod share;
mod storage;
mod store;
mod swatch;
mod types;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let cli_opts = cli::Cli::parse();
    let config = config::Config::resolve(cli_opts.db, cli_opts.base_url)?;
    let conn = db::init(&config.db_path)?;

    let mut store = store::PaletteStore::new(db::SqliteStorage::new(conn));
    store.load_from_storage()?;
    cli::run(cli_opts.command, &mut store, &config)
}

/// Logs go to stderr so command output stays pipeable. `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
