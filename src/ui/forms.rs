use anyhow::{anyhow, Result};
use ratatui::style::Color;
use ratatui::text::{Line, Span};

use super::style::{name_input_style, MAX_NAME_LEN, NAME_PLACEHOLDER};

/// Input state of the create-player modal.
#[derive(Default, Clone)]
pub(crate) struct PlayerForm {
    pub(crate) player_name: String,
    pub(crate) error: Option<String>,
}

impl PlayerForm {
    /// Append a character, refusing control characters and anything past the
    /// name length limit.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.value_len() >= MAX_NAME_LEN {
            return false;
        }
        self.player_name.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.player_name.pop();
    }

    /// Validate the input and return the trimmed name ready for persistence.
    pub(crate) fn parse_inputs(&self) -> Result<String> {
        let name = self.player_name.trim();
        if name.is_empty() {
            return Err(anyhow!("Player name is required."));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(anyhow!(
                "Player name must be at most {MAX_NAME_LEN} characters."
            ));
        }
        Ok(name.to_string())
    }

    pub(crate) fn build_line(&self, accent: Color) -> Line<'static> {
        let display = if self.player_name.is_empty() {
            NAME_PLACEHOLDER.to_string()
        } else {
            self.player_name.clone()
        };

        Line::from(vec![
            Span::raw("Name: "),
            Span::styled(display, name_input_style(accent, self.player_name.is_empty())),
        ])
    }

    pub(crate) fn value_len(&self) -> usize {
        self.player_name.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let form = PlayerForm {
            player_name: "  Ana  ".to_string(),
            error: None,
        };
        assert_eq!(form.parse_inputs().unwrap(), "Ana");
    }

    #[test]
    fn blank_name_is_rejected() {
        let form = PlayerForm {
            player_name: "   ".to_string(),
            error: None,
        };
        assert_eq!(
            form.parse_inputs().unwrap_err().to_string(),
            "Player name is required."
        );
    }

    #[test]
    fn push_char_ignores_control_characters_and_overflow() {
        let mut form = PlayerForm::default();
        assert!(!form.push_char('\n'));
        for _ in 0..MAX_NAME_LEN {
            assert!(form.push_char('x'));
        }
        assert!(!form.push_char('y'));
        assert_eq!(form.value_len(), MAX_NAME_LEN);

        form.backspace();
        assert_eq!(form.value_len(), MAX_NAME_LEN - 1);
    }

    #[test]
    fn empty_form_shows_placeholder() {
        let line = PlayerForm::default().build_line(Color::Yellow);
        assert_eq!(line.spans[1].content, NAME_PLACEHOLDER);
    }
}
