//! # allfields
//!
//! A single form with every common input widget, presence validation on
//! submit and pluggable rendering surfaces.
//!
//! The form has fifteen fields: text, password, date, phone, time, an
//! autocomplete country, a role select, a gender radio group, a multi-line
//! description, a file upload, a slider, a rating and two toggles. Submitting
//! checks the required fields for presence; a valid form is handed to a
//! [`SubmissionSink`].
//!
//! ## Usage
//!
//! ```rust
//! use allfields::{Country, FieldUpdate, FileRef, FormSession, Gender, RecordingSink, Role};
//!
//! let mut session = FormSession::new(RecordingSink::new());
//! session.update(FieldUpdate::Name("Ada".to_string()));
//! session.update(FieldUpdate::Email("a@b.com".to_string()));
//! session.update(FieldUpdate::Password("x".to_string()));
//! session.update(FieldUpdate::Date("2000-01-01".to_string()));
//! session.update(FieldUpdate::Phone("(555) 123-4567".to_string()));
//! session.update(FieldUpdate::Time("09:00".to_string()));
//! session.update(FieldUpdate::Description("test".to_string()));
//! session.update(FieldUpdate::Role(Some(Role::Admin)));
//! session.update(FieldUpdate::Gender(Some(Gender::Male)));
//! session.update(FieldUpdate::Country(Some(Country::Usa)));
//! session.update(FieldUpdate::Files(vec![FileRef::new("cv.pdf").unwrap()]));
//! session.update(FieldUpdate::Agree(true));
//!
//! assert!(session.submit().unwrap().is_submitted());
//! assert_eq!(session.sink().last().unwrap().phone, "5551234567");
//! ```
//!
//! ## Backends
//!
//! Rendering surfaces are separate crates that implement `FormBackend`:
//! - `allfields-ratatui-form` - Terminal form via ratatui
//! - `allfields-egui-form` - Desktop window via egui
//!
//! [`TestBackend`] fills the form from a script, for tests.

// Re-export all types from allfields-types
pub use allfields_types::*;

mod sink;
pub use sink::{LogSink, RecordingSink};

// Test backend for exercising the form without user interaction
mod test_backend;
pub use test_backend::{TestBackend, TestBackendError};
