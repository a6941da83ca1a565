//! Visual constants for the create-player modal and the list screens. Nothing
//! here holds state; callers combine these with the configured accent color.

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Padding};

/// Share of the screen width taken by the create-player modal.
pub(crate) const MODAL_WIDTH_PERCENT: u16 = 80;
/// Share of the screen height taken by the create-player modal.
pub(crate) const MODAL_HEIGHT_PERCENT: u16 = 40;
/// Inner spacing between the modal border and its content.
pub(crate) const MODAL_PADDING: Padding = Padding::new(2, 2, 1, 1);
/// Longest name the modal accepts.
pub(crate) const MAX_NAME_LEN: usize = 40;
/// Longest search text; a query can never be longer than a name it matches.
pub(crate) const MAX_QUERY_LEN: usize = MAX_NAME_LEN;

/// Height of the search box at the top of the Add Player screen.
pub(crate) const SEARCH_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
pub(crate) const FOOTER_HEIGHT: u16 = 3;
/// Tab bar shown above the queue; hidden while adding a player.
pub(crate) const TAB_BAR_HEIGHT: u16 = 1;

pub(crate) const SEARCH_PLACEHOLDER: &str = "Search for a player";
pub(crate) const NAME_PLACEHOLDER: &str = "<player name>";

/// Rounded frame around the modal content.
pub(crate) fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .padding(MODAL_PADDING)
}

/// Text style for the name input.
pub(crate) fn name_input_style(accent: Color, is_empty: bool) -> Style {
    if is_empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(accent)
    }
}

/// Style of the "Create" action hint at the bottom of the modal.
pub(crate) fn create_button_style(accent: Color) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(accent)
        .add_modifier(Modifier::BOLD)
}

/// Underlined search box, echoing the bottom border of a text field.
pub(crate) fn search_block() -> Block<'static> {
    Block::default()
        .title("Search")
        .borders(Borders::BOTTOM)
        .padding(Padding::horizontal(1))
}

/// Style applied to the highlighted row.
pub(crate) fn selected_row_style(accent: Color) -> Style {
    Style::default().fg(accent).add_modifier(Modifier::BOLD)
}

pub(crate) fn key_hint_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}
