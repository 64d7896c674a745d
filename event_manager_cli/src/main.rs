use std::path::PathBuf;

use anyhow::Context;
use event_manager_core::console::StdConsole;
use event_manager_core::{Config, Database};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod menu;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env(std::env::args_os().nth(1).map(PathBuf::from))?;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open store at {}", config.database_path.display()))?;
    info!(path = %config.database_path.display(), "store opened");

    let mut console = StdConsole::new();
    let result = menu::run(&db, &mut console);

    // Release the connection on every exit path, including a failed session
    let closed = db.close();
    result?;
    closed?;
    Ok(())
}
