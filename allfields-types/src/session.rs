use crate::{ErrorState, FieldUpdate, Form, FormBackend, FormError, FormState, SubmissionSink};

/// Result of a submit attempt that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was valid and the sink accepted it.
    Submitted,
    /// Validation failed; the errors are stored on the form.
    Rejected { errors: usize },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// A form together with the sink its submissions go to.
///
/// # Example
///
/// ```
/// use allfields_types::{FieldUpdate, FormSession, FormState, SubmitOutcome};
///
/// let mut sent = Vec::new();
/// let mut session = FormSession::new(|state: &FormState| {
///     sent.push(state.clone());
///     anyhow::Ok(())
/// });
///
/// session.update(FieldUpdate::Name("Ada".to_string()));
/// assert!(matches!(session.submit(), Ok(SubmitOutcome::Rejected { .. })));
/// drop(session);
/// assert!(sent.is_empty());
/// ```
#[derive(Debug)]
pub struct FormSession<S> {
    form: Form,
    sink: S,
}

impl<S: SubmissionSink> FormSession<S> {
    /// Start a session on a freshly loaded form.
    pub fn new(sink: S) -> Self {
        Self::with_form(Form::new(), sink)
    }

    pub fn with_form(form: Form, sink: S) -> Self {
        Self { form, sink }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn state(&self) -> &FormState {
        self.form.state()
    }

    pub fn errors(&self) -> &ErrorState {
        self.form.errors()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn update(&mut self, update: FieldUpdate) {
        self.form.update(update);
    }

    pub fn clear(&mut self) {
        self.form.clear();
    }

    /// Validate and, if the form is valid, hand it to the sink.
    ///
    /// An invalid form stores its errors and never reaches the sink.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        if !self.form.validate() {
            let errors = self.form.errors().len();
            tracing::debug!(errors, "submission rejected");
            return Ok(SubmitOutcome::Rejected { errors });
        }

        self.sink.submit(self.form.state()).map_err(|err| {
            tracing::warn!(error = %err, "submission sink failed");
            FormError::Sink(err)
        })?;
        Ok(SubmitOutcome::Submitted)
    }

    /// Let `backend` edit the form, then submit the result.
    ///
    /// On cancellation or backend failure the form keeps its previous state.
    pub fn run<B: FormBackend>(&mut self, backend: B) -> Result<SubmitOutcome, FormError> {
        let edited = backend.edit(self.form.clone()).map_err(Into::into)?;
        self.form = edited;
        self.submit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Country, Field, FileRef, Gender, Role};

    fn fill(session: &mut FormSession<impl SubmissionSink>) {
        for update in [
            FieldUpdate::Name("Ada".to_string()),
            FieldUpdate::Email("a@b.com".to_string()),
            FieldUpdate::Password("x".to_string()),
            FieldUpdate::Date("2000-01-01".to_string()),
            FieldUpdate::Phone("555-123-4567".to_string()),
            FieldUpdate::Time("09:00".to_string()),
            FieldUpdate::Description("test".to_string()),
            FieldUpdate::Role(Some(Role::Admin)),
            FieldUpdate::Gender(Some(Gender::Male)),
            FieldUpdate::Country(Some(Country::Usa)),
            FieldUpdate::Files(vec![FileRef::new("id.png").unwrap()]),
            FieldUpdate::Agree(true),
        ] {
            session.update(update);
        }
    }

    #[test]
    fn invalid_submit_stores_errors() {
        let mut calls = 0;
        let mut session = FormSession::new(|_: &FormState| {
            calls += 1;
            anyhow::Ok(())
        });

        let outcome = session.submit().unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected { errors: 12 });
        assert_eq!(session.errors().len(), 12);
        assert!(!outcome.is_submitted());
        drop(session);
        assert_eq!(calls, 0);
    }

    #[test]
    fn valid_submit_reaches_sink_once() {
        let mut received = Vec::new();
        let mut session = FormSession::new(|state: &FormState| {
            received.push(state.clone());
            anyhow::Ok(())
        });
        fill(&mut session);
        let expected = session.state().clone();
        assert_eq!(expected.phone, "5551234567");

        assert!(session.submit().unwrap().is_submitted());
        assert!(session.errors().is_empty());
        drop(session);
        assert_eq!(received, vec![expected]);
    }

    #[test]
    fn sink_failure_is_reported() {
        let mut session =
            FormSession::new(|_: &FormState| Err::<(), _>(anyhow::anyhow!("service unavailable")));
        fill(&mut session);

        let err = session.submit().unwrap_err();
        assert!(matches!(err, FormError::Sink(_)));
        assert_eq!(err.to_string(), "Submission failed: service unavailable");
        assert!(session.errors().is_empty());
    }

    #[test]
    fn clear_after_failed_submit() {
        let mut session = FormSession::new(|_: &FormState| anyhow::Ok(()));
        session.update(FieldUpdate::Notifications(true));
        session.submit().unwrap();
        assert!(session.errors().contains(Field::Agree));

        session.clear();
        assert_eq!(session.state(), &FormState::default());
        assert!(session.errors().is_empty());
    }

    struct Cancelling;

    impl FormBackend for Cancelling {
        type Error = FormError;

        fn edit(&self, _form: Form) -> Result<Form, FormError> {
            Err(FormError::Cancelled)
        }
    }

    struct Filling;

    impl FormBackend for Filling {
        type Error = FormError;

        fn edit(&self, form: Form) -> Result<Form, FormError> {
            let mut session = FormSession::with_form(form, |_: &FormState| anyhow::Ok(()));
            fill(&mut session);
            Ok(session.form().clone())
        }
    }

    #[test]
    fn run_cancelled_keeps_form() {
        let mut session = FormSession::new(|_: &FormState| anyhow::Ok(()));
        session.update(FieldUpdate::Name("Grace".to_string()));

        let err = session.run(Cancelling).unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(session.state().name, "Grace");
    }

    #[test]
    fn run_submits_edited_form() {
        let mut count = 0;
        let mut session = FormSession::new(|_: &FormState| {
            count += 1;
            anyhow::Ok(())
        });
        assert_eq!(session.run(Filling).unwrap(), SubmitOutcome::Submitted);
        drop(session);
        assert_eq!(count, 1);
    }
}
