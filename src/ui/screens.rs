use crate::models::{filter_players, Player};

use super::style::MAX_QUERY_LEN;

/// State of the Add Player screen: a local copy of the roster, the search
/// text, and the filtered view derived from both.
pub(crate) struct AddPlayerScreen {
    pub(crate) players: Vec<Player>,
    pub(crate) filtered_players: Vec<Player>,
    pub(crate) query: String,
    pub(crate) selected: usize,
}

impl AddPlayerScreen {
    pub(crate) fn new(players: Vec<Player>) -> Self {
        let mut screen = Self {
            filtered_players: Vec::new(),
            players,
            query: String::new(),
            selected: 0,
        };
        screen.apply_filter();
        screen
    }

    /// Recompute the filtered view. Called whenever the roster or the query
    /// changes so drawing can just read `filtered_players`.
    pub(crate) fn apply_filter(&mut self) {
        self.filtered_players = filter_players(&self.players, &self.query);
        self.ensure_in_bounds();
    }

    pub(crate) fn push_query_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.query.chars().count() >= MAX_QUERY_LEN {
            return false;
        }
        self.query.push(ch);
        self.selected = 0;
        self.apply_filter();
        true
    }

    pub(crate) fn pop_query_char(&mut self) {
        if self.query.pop().is_some() {
            self.selected = 0;
            self.apply_filter();
        }
    }

    /// Replace the roster, e.g. with the list storage returns after a delete.
    pub(crate) fn set_players(&mut self, players: Vec<Player>) {
        self.players = players;
        self.apply_filter();
    }

    /// Append a freshly created player to the local roster.
    pub(crate) fn append_player(&mut self, player: Player) {
        self.players.push(player);
        self.apply_filter();
    }

    pub(crate) fn current_player(&self) -> Option<&Player> {
        self.filtered_players.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = offset_index(self.selected, offset, self.filtered_players.len());
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.filtered_players.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.filtered_players.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered_players.len() {
            self.selected = self.filtered_players.len() - 1;
        }
    }
}

/// Cursor over the queue. The queue itself belongs to the application state.
#[derive(Default)]
pub(crate) struct QueueScreen {
    pub(crate) selected: usize,
}

impl QueueScreen {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        self.selected = offset_index(self.selected, offset, len);
    }

    /// Pull the cursor back inside the queue after it shrank.
    pub(crate) fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

/// Move `current` by `offset`, clamped to `0..len`.
fn offset_index(current: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len as isize - 1;
    (current as isize + offset).clamp(0, max) as usize
}
