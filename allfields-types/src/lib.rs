//! Core types for the allfields crate.
//!
//! This crate provides the presentation-agnostic parts of the form:
//! - `Field`, `FieldKind` - The field catalogue and how each field is rendered
//! - `FormState`, `FieldUpdate` - Current values and the interactions that change them
//! - `validate`, `ErrorState` - Presence validation on submit
//! - `Form`, `FormSession` - State holder and submit/clear handlers
//! - `FormBackend` and `SubmissionSink` traits - For rendering surfaces and receivers

mod field;
pub use field::{Field, FieldKind, ParseFieldError, REQUIRED_FIELDS};

mod choice;
pub use choice::{Choice, Country, Gender, ParseOptionError, Role};

mod file_ref;
pub use file_ref::{ACCEPTED_EXTENSIONS, FileError, FileRef};

mod form_state;
pub use form_state::{
    FieldValue, FormState, PHONE_MAX_LEN, RATING_INITIAL, RATING_MAX, SLIDER_DEFAULT, SLIDER_MAX,
    SLIDER_STEP,
};

mod update;
pub use update::{FieldUpdate, UpdateError, sanitize_phone, snap_slider};

mod validation;
pub use validation::{ErrorState, ValidationError, validate};

mod form;
pub use form::Form;

mod session;
pub use session::{FormSession, SubmitOutcome};

mod error;
pub use error::FormError;

mod traits;
pub use traits::{FormBackend, SubmissionSink};
