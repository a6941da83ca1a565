//! Binary entry point: read the config, start logging, open the player
//! database, and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use player_queue::logging::init_logging;
use player_queue::{config, default_database_path, open_database, run_app, App};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = config::read();
    init_logging(&config.log_level, config.log_file.as_deref())?;

    let db_path = match config.database_path.clone() {
        Some(path) => path,
        None => default_database_path()?,
    };
    let conn = open_database(&db_path)
        .with_context(|| format!("could not open {}", db_path.display()))?;
    info!(path = %db_path.display(), "starting player queue");

    let mut app = App::new(conn, config.theme);
    run_app(&mut app)
}
