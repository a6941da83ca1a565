//! Domain models shared by the storage layer, the queue container, and the
//! TUI. These stay plain data holders; presentation and persistence logic live
//! elsewhere.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Someone who can be put in the queue. Rows in the `players` table map one to
/// one onto this struct.
pub struct Player {
    /// Stable identifier generated at creation time (UUID v4 text).
    pub id: String,
    /// Name shown in lists and matched by the search box.
    pub player_name: String,
}

impl Player {
    /// Case-insensitive substring match against the player's name. The query
    /// must already be lowercased so callers filtering long lists only pay for
    /// the conversion once.
    pub fn name_contains(&self, lowered_query: &str) -> bool {
        self.player_name.to_lowercase().contains(lowered_query)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.player_name)
    }
}

/// Return the players whose name contains `query`, ignoring case, in their
/// original order. An empty query returns the whole list.
pub fn filter_players(players: &[Player], query: &str) -> Vec<Player> {
    if query.is_empty() {
        return players.to_vec();
    }
    let lowered = query.to_lowercase();
    players
        .iter()
        .filter(|player| player.name_contains(&lowered))
        .cloned()
        .collect()
}
