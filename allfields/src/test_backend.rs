//! Test backend for filling the form without user interaction.
//!
//! `TestBackend` replays a scripted list of field updates (and clears) on the
//! form it is given, then validates it the way a rendering surface does when
//! the user presses Submit.
//!
//! # Example
//!
//! ```rust
//! use allfields::{FormSession, RecordingSink, TestBackend};
//!
//! let backend = TestBackend::new()
//!     .with_value("name", "Ada")
//!     .with_value("phone", "555-123-4567");
//!
//! let mut session = FormSession::new(RecordingSink::new());
//! // Most required fields are still empty, so the backend refuses to submit.
//! assert!(session.run(backend).is_err());
//! assert!(session.into_sink().is_empty());
//! ```

use allfields_types::{
    ErrorState, Field, FieldUpdate, Form, FormBackend, FormError, UpdateError,
};

/// One scripted interaction.
#[derive(Debug, Clone)]
enum Step {
    Update(FieldUpdate),
    Raw { key: String, value: String },
    Clear,
}

/// A test backend that applies pre-configured interactions.
#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    steps: Vec<Step>,
}

/// Error type for TestBackend.
#[derive(Debug, thiserror::Error)]
pub enum TestBackendError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for '{field}': {source}")]
    Update {
        field: Field,
        #[source]
        source: UpdateError,
    },

    #[error("Form did not validate: {} error(s), first on '{}'", .0.len(), .0.first().map(Field::key).unwrap_or_default())]
    Invalid(ErrorState),
}

impl From<TestBackendError> for FormError {
    fn from(err: TestBackendError) -> Self {
        FormError::backend(err)
    }
}

impl TestBackend {
    /// Create a new empty test backend.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Apply a typed update.
    pub fn with_update(mut self, update: FieldUpdate) -> Self {
        self.steps.push(Step::Update(update));
        self
    }

    /// Apply a raw value to the field with the given key.
    ///
    /// The value is interpreted as described in [`FieldUpdate::parse`].
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.steps.push(Step::Raw {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Press the clear button.
    pub fn with_clear(mut self) -> Self {
        self.steps.push(Step::Clear);
        self
    }

    /// Apply the script to `form` without validating.
    pub fn replay(&self, form: &mut Form) -> Result<(), TestBackendError> {
        for step in &self.steps {
            match step {
                Step::Update(update) => form.update(update.clone()),
                Step::Raw { key, value } => {
                    let field: Field = key
                        .parse()
                        .map_err(|_| TestBackendError::UnknownField(key.clone()))?;
                    let update = FieldUpdate::parse(field, value)
                        .map_err(|source| TestBackendError::Update { field, source })?;
                    form.update(update);
                }
                Step::Clear => form.clear(),
            }
        }
        Ok(())
    }
}

impl FormBackend for TestBackend {
    type Error = TestBackendError;

    fn edit(&self, mut form: Form) -> Result<Form, Self::Error> {
        self.replay(&mut form)?;
        if form.validate() {
            Ok(form)
        } else {
            Err(TestBackendError::Invalid(form.errors().clone()))
        }
    }
}
