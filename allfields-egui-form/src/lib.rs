//! # allfields-egui-form
//!
//! An egui form backend for allfields that renders the form in a native
//! desktop window.
//!
//! This backend uses the `eframe` and `egui` crates. All fields are displayed
//! at once and can be edited in any order: the country is picked from a
//! filtered list, the role from a combo box, the rating by clicking stars
//! (clicking the current star clears it). Pressing Submit validates the form;
//! errors are shown under each field and the window stays open until the
//! form is valid or the user cancels.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use allfields::{FormSession, LogSink};
//! use allfields_egui_form::EguiFormBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let backend = EguiFormBackend::new()
//!         .with_title("Sign up")
//!         .with_window_size([480.0, 800.0]);
//!
//!     let mut session = FormSession::new(LogSink::new());
//!     let outcome = session.run(backend)?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{EguiFormBackend, EguiFormError};
