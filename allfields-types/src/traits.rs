use crate::{Form, FormError, FormState};

/// Receiver of a validated form, e.g. an API client or a logger.
pub trait SubmissionSink {
    /// Hand over a form that passed validation.
    fn submit(&mut self, state: &FormState) -> anyhow::Result<()>;
}

impl<F> SubmissionSink for F
where
    F: FnMut(&FormState) -> anyhow::Result<()>,
{
    fn submit(&mut self, state: &FormState) -> anyhow::Result<()> {
        self(state)
    }
}

/// Trait for rendering surfaces that let a user fill in the form.
///
/// Backends receive the current `Form` and return it once the user asks to
/// submit and validation passes. They decide how to present the fields and
/// show validation errors inline; clearing is handled inside the backend.
pub trait FormBackend {
    /// The error type for this backend. Cancellation must convert to
    /// [`FormError::Cancelled`].
    type Error: Into<FormError>;

    /// Let the user edit `form`.
    ///
    /// # Returns
    /// * `Ok(form)` once the form validated on a submit request
    /// * `Err` on cancellation or backend failure
    fn edit(&self, form: Form) -> Result<Form, Self::Error>;
}
