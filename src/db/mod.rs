//! Persistence module split across logical submodules.

mod connection;
mod players;

pub use connection::{data_dir, default_database_path, ensure_schema, open_database};
pub use players::{create_player, delete_player, fetch_players, set_players};
