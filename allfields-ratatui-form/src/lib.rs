//! # allfields-ratatui-form
//!
//! Ratatui form backend for allfields.
//!
//! This backend displays all fields at once in a scrollable TUI form. Users
//! navigate between fields using Tab/Shift+Tab or arrow keys, adjust the
//! slider and rating with Left/Right, and submit with F10, Ctrl+Enter or the
//! Submit button. Validation errors are shown on the border of the offending
//! field and focus jumps to the first one.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use allfields::{FormSession, LogSink};
//! use allfields_ratatui_form::RatatuiFormBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let backend = RatatuiFormBackend::new().with_title("Sign up");
//!     let mut session = FormSession::new(LogSink::new());
//!     let outcome = session.run(backend)?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

mod backend;
mod draw;
mod view;

pub use backend::{RatatuiFormBackend, RatatuiFormError, Theme};
