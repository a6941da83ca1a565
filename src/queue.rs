//! The queue of players waiting for their turn.
//!
//! State lives in [`QueueState`], which the application owns and lends out by
//! reference. Every change is expressed as a [`QueueAction`] and applied by
//! the pure [`reduce`] function, so the screens never mutate the queue
//! directly.

use tracing::debug;

use crate::models::Player;

/// Ordered list of queued players. A player appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueState {
    players: Vec<Player>,
}

/// Every way the queue can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueAction {
    /// Append a player to the back unless they are already queued.
    Add(Player),
    /// Drop the player with this id, wherever they are.
    Remove { id: String },
    /// Send the player at the front to the back.
    Rotate,
    Clear,
}

impl QueueState {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.iter().any(|player| player.id == id)
    }

    /// Apply `action` in place.
    pub fn dispatch(&mut self, action: QueueAction) {
        debug!(?action, "queue action");
        let current = std::mem::take(self);
        *self = reduce(current, action);
    }
}

/// Produce the next queue state from the current one and an action.
pub fn reduce(mut state: QueueState, action: QueueAction) -> QueueState {
    match action {
        QueueAction::Add(player) => {
            if !state.contains(&player.id) {
                state.players.push(player);
            }
        }
        QueueAction::Remove { id } => {
            state.players.retain(|player| player.id != id);
        }
        QueueAction::Rotate => {
            if state.players.len() > 1 {
                state.players.rotate_left(1);
            }
        }
        QueueAction::Clear => state.players.clear(),
    }
    state
}
