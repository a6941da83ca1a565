//! Ratatui front-end: the queue screen, the Add Player screen layered on top
//! of it, and the create-player modal.

mod app;
mod forms;
mod helpers;
mod screens;
mod style;
mod terminal;

pub use app::App;
pub use terminal::run_app;
