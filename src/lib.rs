//! Core library surface for the Player Queue TUI.
//!
//! The binary only wires these pieces together; keeping them in a library
//! lets the storage layer and the queue container be reused or tested on
//! their own.
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod queue;
pub mod ui;

/// Persistence entry points used at startup.
pub use db::{default_database_path, open_database};

pub use models::{filter_players, Player};
pub use queue::{QueueAction, QueueState};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
