use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;
use tracing::debug;

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".player-queue";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "players.sqlite";

/// Open (creating if needed) the SQLite database at `path` and make sure the
/// schema exists.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(path).context("failed to open SQLite database")?;
    ensure_schema(&conn)?;
    debug!(path = %path.display(), "opened player database");
    Ok(conn)
}

/// Run the lazy migrations. Safe to call on every start.
///
/// `position` keeps players in the order they were added so a freshly created
/// player can be appended to an in-memory list without re-fetching.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS players (
            id TEXT PRIMARY KEY,
            player_name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            position INTEGER NOT NULL
        )",
        [],
    )
    .context("failed to create players table")?;

    Ok(())
}

/// Resolve the default database location inside the user's home.
pub fn default_database_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(DB_FILE_NAME))
}

/// Directory holding the database and the config file.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
