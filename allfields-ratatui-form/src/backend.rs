//! Ratatui form backend implementation for the FormBackend trait.
//!
//! Displays all fields at once in a scrollable form with keyboard navigation.

use allfields::{Form, FormBackend, FormError};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend, style::Color};
use std::io::{self, IsTerminal, Stdout};
use thiserror::Error;

use crate::draw::draw_form;
use crate::view::{Control, FormView};

/// Error type for the Ratatui form backend.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// User cancelled the form (e.g., pressed Esc).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup/restore error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<RatatuiFormError> for FormError {
    fn from(err: RatatuiFormError) -> Self {
        match err {
            RatatuiFormError::Cancelled => FormError::Cancelled,
            other => FormError::backend(other),
        }
    }
}

/// Color theme for the TUI form.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

/// Ratatui form backend that displays all fields at once.
#[derive(Debug, Clone)]
pub struct RatatuiFormBackend {
    /// Title shown at the top of the form.
    title: String,
    /// Color theme for the UI.
    theme: Theme,
}

impl Default for RatatuiFormBackend {
    fn default() -> Self {
        Self::new()
    }
}

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode and the alternate screen need an interactive stdout.
fn require_tty(is_terminal: bool) -> Result<(), RatatuiFormError> {
    if is_terminal {
        Ok(())
    } else {
        Err(RatatuiFormError::Terminal("stdout is not a terminal".to_string()))
    }
}

impl RatatuiFormBackend {
    /// Create a new Ratatui form backend with default settings.
    pub fn new() -> Self {
        Self {
            title: "All Fields Form".to_string(),
            theme: Theme::default(),
        }
    }

    /// Set the title shown at the top of the form.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn setup_terminal(&self) -> Result<CrosstermTerminal, RatatuiFormError> {
        let mut stdout = io::stdout();
        require_tty(stdout.is_terminal())?;
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(&self, terminal: &mut CrosstermTerminal) -> Result<(), RatatuiFormError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn event_loop(
        &self,
        terminal: &mut CrosstermTerminal,
        view: &mut FormView,
    ) -> Result<Control, RatatuiFormError> {
        loop {
            terminal.draw(|frame| draw_form(frame, view, &self.title, &self.theme))?;

            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                match view.handle_key(key) {
                    Control::Continue => {}
                    done => return Ok(done),
                }
            }
        }
    }
}

impl FormBackend for RatatuiFormBackend {
    type Error = RatatuiFormError;

    fn edit(&self, form: Form) -> Result<Form, Self::Error> {
        let mut terminal = self.setup_terminal()?;
        let mut view = FormView::new(form);

        let outcome = self.event_loop(&mut terminal, &mut view);
        // Leave the alternate screen before reporting anything, even on error.
        let restored = self.restore_terminal(&mut terminal);
        let control = outcome?;
        restored?;

        match control {
            Control::Submitted => Ok(view.into_form()),
            _ => Err(RatatuiFormError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_creation() {
        let _backend = RatatuiFormBackend::new();
        let _with_title = RatatuiFormBackend::new().with_title("Test");
        let _with_theme = RatatuiFormBackend::new().with_theme(Theme::default());
    }

    #[test]
    fn error_types() {
        let err = RatatuiFormError::Cancelled;
        assert_eq!(err.to_string(), "Form cancelled by user");

        let err = RatatuiFormError::Terminal("test error".to_string());
        assert_eq!(err.to_string(), "Terminal error: test error");
    }

    #[test]
    fn errors_map_to_form_errors() {
        assert!(FormError::from(RatatuiFormError::Cancelled).is_cancelled());

        let err = FormError::from(RatatuiFormError::Terminal("no tty".to_string()));
        assert!(!err.is_cancelled());
        assert_eq!(err.to_string(), "Backend error: Terminal error: no tty");
    }

    #[test]
    fn redirected_stdout_is_refused() {
        assert!(require_tty(true).is_ok());

        let err = FormError::from(require_tty(false).unwrap_err());
        assert_eq!(
            err.to_string(),
            "Backend error: Terminal error: stdout is not a terminal"
        );
    }

    #[test]
    fn theme_default() {
        let theme = Theme::default();
        assert_eq!(theme.primary, Color::Cyan);
        assert_eq!(theme.error, Color::Red);
    }
}
