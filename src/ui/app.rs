use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use rusqlite::Connection;
use tracing::{debug, error, info};

use crate::config::ThemeConfig;
use crate::db::{create_player, delete_player, fetch_players};
use crate::models::Player;
use crate::queue::{QueueAction, QueueState};

use super::forms::PlayerForm;
use super::helpers::{centered_rect, display_width, ordinal_label, surface_error};
use super::screens::{AddPlayerScreen, QueueScreen};
use super::style::{
    create_button_style, key_hint_style, modal_block, search_block, selected_row_style,
    FOOTER_HEIGHT, MODAL_HEIGHT_PERCENT, MODAL_WIDTH_PERCENT, SEARCH_HEIGHT, SEARCH_PLACEHOLDER,
    TAB_BAR_HEIGHT,
};

/// Navigation stack. The Add Player screen is pushed on top of the queue and
/// popped again when the user picks someone or backs out.
enum Screen {
    Queue,
    AddPlayer(AddPlayerScreen),
}

/// Overlay state for the current screen. `CreatingPlayer` is the open modal.
enum Mode {
    Normal,
    CreatingPlayer(PlayerForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    queue: QueueState,
    queue_cursor: QueueScreen,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    tab_bar_visible: bool,
    theme: ThemeConfig,
}

impl App {
    pub fn new(conn: Connection, theme: ThemeConfig) -> Self {
        Self {
            conn,
            queue: QueueState::default(),
            queue_cursor: QueueScreen::default(),
            screen: Screen::Queue,
            mode: Mode::Normal,
            status: None,
            tab_bar_visible: true,
            theme,
        }
    }

    pub fn queue(&self) -> &QueueState {
        &self.queue
    }

    pub fn is_adding_player(&self) -> bool {
        matches!(self.screen, Screen::AddPlayer(_))
    }

    pub fn is_create_modal_open(&self) -> bool {
        matches!(self.mode, Mode::CreatingPlayer(_))
    }

    pub fn tab_bar_visible(&self) -> bool {
        self.tab_bar_visible
    }

    /// Process a key press without modifiers. Returns `true` when the app
    /// should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::CreatingPlayer(form) => self.handle_create_player(code, form)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Queue => {
                let len = self.queue.len();
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => self.queue_cursor.move_selection(-1, len),
                    KeyCode::Down => self.queue_cursor.move_selection(1, len),
                    KeyCode::Home => self.queue_cursor.selected = 0,
                    KeyCode::End => self.queue_cursor.selected = len.saturating_sub(1),
                    KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                        self.clear_status();
                        self.open_add_player();
                    }
                    KeyCode::Char('-') => self.remove_selected_from_queue(),
                    KeyCode::Char('n') | KeyCode::Char('N') => {
                        if self.queue.len() > 1 {
                            self.queue.dispatch(QueueAction::Rotate);
                            if let Some(next) = self.queue.players().first() {
                                let text = format!("{next} is up next.");
                                self.set_status(text, StatusKind::Info);
                            }
                        } else {
                            self.set_status(
                                "Need at least two players to rotate.",
                                StatusKind::Error,
                            );
                        }
                    }
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        if !self.queue.is_empty() {
                            self.queue.dispatch(QueueAction::Clear);
                            self.queue_cursor.clamp(0);
                            self.set_status("Queue cleared.", StatusKind::Info);
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::AddPlayer(ref mut screen) => {
                match code {
                    KeyCode::Esc => {
                        self.clear_status();
                        self.go_back();
                    }
                    KeyCode::Up => screen.move_selection(-1),
                    KeyCode::Down => screen.move_selection(1),
                    KeyCode::PageUp => screen.move_selection(-5),
                    KeyCode::PageDown => screen.move_selection(5),
                    KeyCode::Home => screen.select_first(),
                    KeyCode::End => screen.select_last(),
                    KeyCode::Backspace => screen.pop_query_char(),
                    KeyCode::Enter => {
                        if let Some(player) = screen.current_player().cloned() {
                            self.select_player(player);
                        } else {
                            self.set_status("No player selected.", StatusKind::Error);
                        }
                    }
                    KeyCode::Char(ch) => {
                        screen.push_query_char(ch);
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_create_player(&mut self, code: KeyCode, mut form: PlayerForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Create player cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
            }
            KeyCode::Enter => match self.save_new_player(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::CreatingPlayer(form))
        } else {
            debug!("create player modal closed");
            Ok(Mode::Normal)
        }
    }

    /// Route a key pressed with Ctrl held. Only Ctrl-C, Ctrl-N, and Ctrl-D mean
    /// anything; other combinations are swallowed so they never reach the
    /// search box or the name input as plain characters. Returns `true` when
    /// the app should exit.
    pub(crate) fn handle_ctrl_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('c') => return Ok(true),
            KeyCode::Char('n') => self.handle_ctrl_n()?,
            KeyCode::Char('d') => self.handle_ctrl_d()?,
            _ => {}
        }
        Ok(false)
    }

    /// Ctrl-N: open the create-player modal from the Add Player screen.
    fn handle_ctrl_n(&mut self) -> Result<()> {
        if self.is_adding_player() && matches!(self.mode, Mode::Normal) {
            self.clear_status();
            debug!("create player modal opened");
            self.mode = Mode::CreatingPlayer(PlayerForm::default());
        }
        Ok(())
    }

    /// Ctrl-D: delete the highlighted player from storage.
    fn handle_ctrl_d(&mut self) -> Result<()> {
        if !matches!(self.mode, Mode::Normal) {
            return Ok(());
        }

        let player = match &self.screen {
            Screen::AddPlayer(screen) => screen.current_player().cloned(),
            Screen::Queue => return Ok(()),
        };

        match player {
            Some(player) => self.perform_delete(&player),
            None => self.set_status("No player selected to delete.", StatusKind::Error),
        }
        Ok(())
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let tab_height = if self.tab_bar_visible {
            TAB_BAR_HEIGHT
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(tab_height),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        if self.tab_bar_visible {
            self.draw_tab_bar(frame, chunks[0]);
        }

        match &self.screen {
            Screen::Queue => self.draw_queue(frame, chunks[1]),
            Screen::AddPlayer(screen) => self.draw_add_player(frame, chunks[1], screen),
        }

        self.draw_footer(frame, chunks[2]);

        if let Mode::CreatingPlayer(form) = &self.mode {
            self.draw_create_player(frame, area, form);
        }
    }

    fn draw_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let tabs = Tabs::new(vec![format!("Queue ({})", self.queue.len())])
            .select(0)
            .highlight_style(selected_row_style(self.theme.accent));
        frame.render_widget(tabs, area);
    }

    fn draw_queue(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Up next").borders(Borders::ALL);

        if self.queue.is_empty() {
            let message = Paragraph::new("Queue is empty. Press 'a' to add a player.")
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .queue
            .players()
            .iter()
            .enumerate()
            .map(|(index, player)| {
                ListItem::new(format!("{} {}", ordinal_label(index), player.player_name))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(selected_row_style(self.theme.accent))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.queue_cursor.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_add_player(&self, frame: &mut Frame, area: Rect, screen: &AddPlayerScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(SEARCH_HEIGHT), Constraint::Min(0)])
            .split(area);

        let block = search_block();
        let inner = block.inner(chunks[0]);
        let query_line = if screen.query.is_empty() {
            Line::from(Span::styled(
                SEARCH_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(screen.query.clone())
        };
        frame.render_widget(Paragraph::new(query_line).block(block), chunks[0]);

        let list_area = chunks[1];
        if screen.filtered_players.is_empty() {
            let text = if screen.players.is_empty() {
                "No players yet. Press Ctrl-N to create one.".to_string()
            } else {
                format!("No players match \"{}\".", screen.query)
            };
            let message = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, list_area);
        } else {
            let items: Vec<ListItem> = screen
                .filtered_players
                .iter()
                .map(|player| {
                    let queued = if self.queue.contains(&player.id) {
                        Span::styled("  (queued)", Style::default().fg(Color::Gray))
                    } else {
                        Span::raw("")
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(player.player_name.clone()),
                        queued,
                    ]))
                })
                .collect();

            let list = List::new(items)
                .highlight_style(selected_row_style(self.theme.accent))
                .highlight_symbol("▶ ");

            let mut list_state = ListState::default();
            list_state.select(Some(screen.selected));
            frame.render_stateful_widget(list, list_area, &mut list_state);
        }

        if matches!(self.mode, Mode::Normal) && inner.height > 0 {
            let cursor_x = inner.x.saturating_add(display_width(&screen.query));
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn draw_create_player(&self, frame: &mut Frame, area: Rect, form: &PlayerForm) {
        let popup_area = centered_rect(MODAL_WIDTH_PERCENT, MODAL_HEIGHT_PERCENT, area);
        frame.render_widget(Clear, popup_area);

        let block = modal_block("Create Player");
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let accent = self.theme.accent;
        let mut lines = vec![form.build_line(accent), Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Type the new player's name.",
                Style::default().fg(Color::Gray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Create ", create_button_style(accent)),
            Span::raw(" "),
            Span::styled("[Enter]", key_hint_style()),
            Span::raw("   "),
            Span::styled("[Esc]", key_hint_style()),
            Span::raw(" Close"),
        ]));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if inner.height > 0 {
            let cursor_x = inner
                .x
                .saturating_add(display_width("Name: "))
                .saturating_add(display_width(&form.player_name));
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = key_hint_style();
        match (&self.screen, &self.mode) {
            (_, Mode::CreatingPlayer(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Create   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Close"),
            ]),
            (Screen::Queue, Mode::Normal) => Line::from(vec![
                Span::styled("[a]", key_style),
                Span::raw(" Add player   "),
                Span::styled("[n]", key_style),
                Span::raw(" Next turn   "),
                Span::styled("[-]", key_style),
                Span::raw(" Remove   "),
                Span::styled("[c]", key_style),
                Span::raw(" Clear   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            (Screen::AddPlayer(_), Mode::Normal) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Add to queue   "),
                Span::styled("[Ctrl-N]", key_style),
                Span::raw(" New player   "),
                Span::styled("[Ctrl-D]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back"),
            ]),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Push the Add Player screen with a fresh copy of the roster and hide the
    /// tab bar. A storage failure keeps the user on the queue.
    pub(crate) fn open_add_player(&mut self) {
        match fetch_players(&self.conn) {
            Ok(players) => {
                info!(count = players.len(), "opening add player screen");
                self.screen = Screen::AddPlayer(AddPlayerScreen::new(players));
                self.tab_bar_visible = false;
            }
            Err(err) => {
                error!(error = %err, "failed to load players");
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    /// Pop back to the queue, dropping the local roster copy, and restore the
    /// tab bar.
    pub(crate) fn go_back(&mut self) {
        debug!("leaving add player screen");
        self.mode = Mode::Normal;
        self.screen = Screen::Queue;
        self.tab_bar_visible = true;
    }

    fn select_player(&mut self, player: Player) {
        let already_queued = self.queue.contains(&player.id);
        self.queue.dispatch(QueueAction::Add(player.clone()));
        self.go_back();
        if already_queued {
            self.set_status(format!("{player} is already in the queue."), StatusKind::Info);
        } else {
            self.queue_cursor.selected = self.queue.len().saturating_sub(1);
            self.set_status(format!("Added {player} to the queue."), StatusKind::Info);
        }
    }

    fn remove_selected_from_queue(&mut self) {
        let Some(player) = self.queue.players().get(self.queue_cursor.selected).cloned() else {
            self.set_status("No player selected to remove.", StatusKind::Error);
            return;
        };
        self.queue.dispatch(QueueAction::Remove {
            id: player.id.clone(),
        });
        self.queue_cursor.clamp(self.queue.len());
        self.set_status(format!("Removed {player} from the queue."), StatusKind::Info);
    }

    fn save_new_player(&mut self, form: &PlayerForm) -> Result<()> {
        let name = form.parse_inputs()?;
        let player = create_player(&self.conn, &name)?;
        self.set_status(format!("Created {player}."), StatusKind::Info);
        if let Screen::AddPlayer(ref mut screen) = self.screen {
            screen.append_player(player);
        }
        Ok(())
    }

    fn perform_delete(&mut self, player: &Player) {
        match delete_player(&self.conn, player) {
            Ok(remaining) => {
                if let Screen::AddPlayer(ref mut screen) = self.screen {
                    screen.set_players(remaining);
                }
                self.queue.dispatch(QueueAction::Remove {
                    id: player.id.clone(),
                });
                self.queue_cursor.clamp(self.queue.len());
                self.set_status(format!("Deleted {player}."), StatusKind::Info);
            }
            Err(err) => {
                error!(error = %err, id = %player.id, "failed to delete player");
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    #[cfg(test)]
    fn add_player_screen(&self) -> Option<&AddPlayerScreen> {
        match &self.screen {
            Screen::AddPlayer(screen) => Some(screen),
            Screen::Queue => None,
        }
    }

    #[cfg(test)]
    fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ensure_schema, fetch_players};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app_with(names: &[&str]) -> App {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        for name in names {
            create_player(&conn, name).unwrap();
        }
        App::new(conn, ThemeConfig::default())
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn visible_names(app: &App) -> Vec<String> {
        app.add_player_screen()
            .unwrap()
            .filtered_players
            .iter()
            .map(|p| p.player_name.clone())
            .collect()
    }

    fn queued_names(app: &App) -> Vec<String> {
        app.queue()
            .players()
            .iter()
            .map(|p| p.player_name.clone())
            .collect()
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn entering_add_player_hides_tab_bar_and_loads_roster() {
        let mut app = app_with(&["Ana", "Bruno"]);
        assert!(app.tab_bar_visible());

        app.handle_key(KeyCode::Char('a')).unwrap();
        assert!(app.is_adding_player());
        assert!(!app.tab_bar_visible());
        assert_eq!(visible_names(&app), vec!["Ana", "Bruno"]);

        app.handle_key(KeyCode::Esc).unwrap();
        assert!(!app.is_adding_player());
        assert!(app.tab_bar_visible());
    }

    #[test]
    fn search_filters_case_insensitively() {
        let mut app = app_with(&["Ana", "Bruno"]);
        app.open_add_player();
        type_text(&mut app, "AN");
        assert_eq!(visible_names(&app), vec!["Ana"]);

        app.handle_key(KeyCode::Backspace).unwrap();
        app.handle_key(KeyCode::Backspace).unwrap();
        assert_eq!(visible_names(&app), vec!["Ana", "Bruno"]);
    }

    #[test]
    fn typing_q_searches_instead_of_quitting() {
        let mut app = app_with(&["Quentin"]);
        app.open_add_player();
        assert!(!app.handle_key(KeyCode::Char('q')).unwrap());
        assert_eq!(visible_names(&app), vec!["Quentin"]);
    }

    #[test]
    fn selecting_a_player_queues_them_and_goes_back() {
        let mut app = app_with(&["Ana", "Bruno"]);
        app.open_add_player();
        type_text(&mut app, "bru");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(!app.is_adding_player());
        assert!(app.tab_bar_visible());
        assert_eq!(queued_names(&app), vec!["Bruno"]);
        assert_eq!(app.status_text(), Some("Added Bruno to the queue."));
    }

    #[test]
    fn selecting_a_queued_player_does_not_duplicate() {
        let mut app = app_with(&["Ana"]);
        for _ in 0..2 {
            app.open_add_player();
            app.handle_key(KeyCode::Enter).unwrap();
        }
        assert_eq!(queued_names(&app), vec!["Ana"]);
        assert_eq!(app.status_text(), Some("Ana is already in the queue."));
    }

    #[test]
    fn enter_with_no_match_stays_on_screen() {
        let mut app = app_with(&["Ana"]);
        app.open_add_player();
        type_text(&mut app, "zzz");
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(app.is_adding_player());
        assert!(app.queue().is_empty());
    }

    #[test]
    fn modal_opens_creates_and_closes() {
        let mut app = app_with(&["Ana"]);
        app.open_add_player();
        assert!(!app.is_create_modal_open());

        app.handle_ctrl_n().unwrap();
        assert!(app.is_create_modal_open());

        type_text(&mut app, "Carla");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(!app.is_create_modal_open());
        assert!(app.is_adding_player());
        assert_eq!(visible_names(&app), vec!["Ana", "Carla"]);
        assert_eq!(app.status_text(), Some("Created Carla."));
        assert_eq!(fetch_players(&app.conn).unwrap().len(), 2);
    }

    #[test]
    fn modal_escape_closes_without_creating() {
        let mut app = app_with(&[]);
        app.open_add_player();
        app.handle_ctrl_n().unwrap();
        type_text(&mut app, "Dani");
        app.handle_key(KeyCode::Esc).unwrap();

        assert!(!app.is_create_modal_open());
        assert!(app.is_adding_player());
        assert!(visible_names(&app).is_empty());
    }

    #[test]
    fn invalid_name_keeps_modal_open_with_error() {
        let mut app = app_with(&["Ana"]);
        app.open_add_player();
        app.handle_ctrl_n().unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(app.is_create_modal_open());
        assert_eq!(app.status_text(), Some("Player name is required."));

        type_text(&mut app, "ana");
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(app.is_create_modal_open());
        assert_eq!(app.status_text(), Some("Player ana already exists."));
        assert_eq!(visible_names(&app), vec!["Ana"]);
    }

    #[test]
    fn ctrl_n_is_ignored_on_the_queue_screen() {
        let mut app = app_with(&[]);
        app.handle_ctrl_n().unwrap();
        assert!(!app.is_create_modal_open());
    }

    #[test]
    fn deleting_replaces_list_and_drops_player_from_queue() {
        let mut app = app_with(&["Ana", "Bruno", "Carla"]);
        app.open_add_player();
        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(queued_names(&app), vec!["Bruno"]);

        app.open_add_player();
        app.handle_key(KeyCode::Down).unwrap();
        app.handle_ctrl_d().unwrap();

        assert_eq!(visible_names(&app), vec!["Ana", "Carla"]);
        assert!(app.queue().is_empty());
        assert_eq!(app.status_text(), Some("Deleted Bruno."));
    }

    #[test]
    fn deleting_with_empty_roster_reports_error() {
        let mut app = app_with(&[]);
        app.open_add_player();
        app.handle_ctrl_d().unwrap();
        assert_eq!(app.status_text(), Some("No player selected to delete."));
    }

    #[test]
    fn deleting_a_player_removed_elsewhere_surfaces_error() {
        let mut app = app_with(&["Ana"]);
        app.open_add_player();
        app.conn.execute("DELETE FROM players", []).unwrap();

        app.handle_ctrl_d().unwrap();
        assert_eq!(app.status_text(), Some("Player not found"));
        assert_eq!(visible_names(&app), vec!["Ana"]);
    }

    #[test]
    fn queue_keys_rotate_remove_and_clear() {
        let mut app = app_with(&["Ana", "Bruno", "Carla"]);
        for index in 0..3 {
            app.open_add_player();
            for _ in 0..index {
                app.handle_key(KeyCode::Down).unwrap();
            }
            app.handle_key(KeyCode::Enter).unwrap();
        }
        assert_eq!(queued_names(&app), vec!["Ana", "Bruno", "Carla"]);

        app.handle_key(KeyCode::Char('n')).unwrap();
        assert_eq!(queued_names(&app), vec!["Bruno", "Carla", "Ana"]);
        assert_eq!(app.status_text(), Some("Bruno is up next."));

        app.handle_key(KeyCode::Home).unwrap();
        app.handle_key(KeyCode::Char('-')).unwrap();
        assert_eq!(queued_names(&app), vec!["Carla", "Ana"]);

        app.handle_key(KeyCode::Char('c')).unwrap();
        assert!(app.queue().is_empty());
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn draw_shows_tab_bar_search_and_modal() {
        let mut app = app_with(&["Ana"]);
        let queue_view = render(&app);
        assert!(queue_view.contains("Queue (0)"));
        assert!(queue_view.contains("Queue is empty"));

        app.open_add_player();
        let add_view = render(&app);
        assert!(!add_view.contains("Queue (0)"));
        assert!(add_view.contains(SEARCH_PLACEHOLDER));
        assert!(add_view.contains("Ana"));

        app.handle_ctrl_n().unwrap();
        let modal_view = render(&app);
        assert!(modal_view.contains("Create Player"));
    }

    #[test]
    fn unbound_ctrl_keys_do_not_type_or_navigate() {
        let mut app = app_with(&["Ana", "Uli"]);
        assert!(!app.handle_ctrl_key(KeyCode::Char('a')).unwrap());
        assert!(!app.is_adding_player());

        app.open_add_player();
        for ch in ['u', 'w', 'q'] {
            assert!(!app.handle_ctrl_key(KeyCode::Char(ch)).unwrap());
        }
        assert_eq!(app.add_player_screen().unwrap().query, "");
        assert_eq!(visible_names(&app), vec!["Ana", "Uli"]);

        app.handle_ctrl_key(KeyCode::Char('n')).unwrap();
        app.handle_ctrl_key(KeyCode::Char('w')).unwrap();
        type_text(&mut app, "Bea");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.status_text(), Some("Created Bea."));

        assert!(app.handle_ctrl_key(KeyCode::Char('c')).unwrap());
    }

    #[test]
    fn search_cursor_accounts_for_wide_characters() {
        let mut app = app_with(&["李娜"]);
        app.open_add_player();
        type_text(&mut app, "李娜");

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor.x, 1 + 4);
    }
}
