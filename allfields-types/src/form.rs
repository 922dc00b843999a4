use crate::{ErrorState, Field, FieldUpdate, FormState, validate};

/// The form state holder: current values plus the errors of the last
/// validation.
///
/// Updates never validate. Errors are recomputed wholesale by
/// [`Form::validate`] and dropped by [`Form::clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    state: FormState,
    errors: ErrorState,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// A freshly loaded form.
    pub fn new() -> Self {
        Self::with_state(FormState::initial())
    }

    /// A form pre-filled with `state` and no errors.
    pub fn with_state(state: FormState) -> Self {
        Self {
            state,
            errors: ErrorState::new(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    /// Message to show next to `field`, if its last validation failed.
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.message(field)
    }

    pub fn update(&mut self, update: FieldUpdate) {
        tracing::debug!(field = %update.field(), "field updated");
        update.apply(&mut self.state);
    }

    /// Recompute the errors from the current state and report whether the
    /// form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.state);
        tracing::debug!(errors = self.errors.len(), "form validated");
        self.errors.is_empty()
    }

    /// Reset every field to its default and drop all errors.
    pub fn clear(&mut self) {
        self.state = FormState::default();
        self.errors.clear();
        tracing::debug!("form cleared");
    }

    pub fn into_state(self) -> FormState {
        self.state
    }
}
