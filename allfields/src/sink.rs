//! Ready-made submission sinks.

use allfields_types::{Choice, FormState, SubmissionSink};

/// Sink that logs every submitted form at `info` level.
///
/// The password is never logged, only its length.
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    target: Option<String>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label added to each log line, e.g. the form's title.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl SubmissionSink for LogSink {
    fn submit(&mut self, state: &FormState) -> anyhow::Result<()> {
        tracing::info!(
            form = self.target.as_deref().unwrap_or("form"),
            name = %state.name,
            email = %state.email,
            password_len = state.password.chars().count(),
            date = %state.date,
            phone = %state.phone,
            time = %state.time,
            country = state.country.map(Choice::value).unwrap_or_default(),
            role = state.role.map(Choice::value).unwrap_or_default(),
            gender = state.gender.map(Choice::value).unwrap_or_default(),
            description = %state.description,
            file = state.file.as_ref().map(|f| f.name()).unwrap_or_default(),
            rating = state.rating,
            slider = state.slider,
            agree = state.agree,
            notifications = state.notifications,
            "form submitted"
        );
        Ok(())
    }
}

/// Sink that keeps a copy of every submitted form.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    submissions: Vec<FormState>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> &[FormState] {
        &self.submissions
    }

    pub fn last(&self) -> Option<&FormState> {
        self.submissions.last()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

impl SubmissionSink for RecordingSink {
    fn submit(&mut self, state: &FormState) -> anyhow::Result<()> {
        self.submissions.push(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allfields_types::{Country, FileRef};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn log_sink_redacts_password() {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let state = FormState {
            name: "Ada".to_string(),
            password: "hunter2".to_string(),
            country: Some(Country::Germany),
            file: Some(FileRef::new("cv.pdf").unwrap()),
            ..FormState::default()
        };

        tracing::subscriber::with_default(subscriber, || {
            LogSink::new().with_target("signup").submit(&state).unwrap();
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("form submitted"));
        assert!(output.contains("signup"));
        assert!(output.contains("Germany"));
        assert!(output.contains("cv.pdf"));
        assert!(output.contains("password_len=7"));
        assert!(!output.contains("hunter2"));
    }

    #[test]
    fn recording_sink_keeps_copies() {
        let mut sink = RecordingSink::new();
        assert!(sink.is_empty());

        let state = FormState::initial();
        sink.submit(&state).unwrap();
        sink.submit(&FormState::default()).unwrap();

        assert_eq!(sink.submissions().len(), 2);
        assert_eq!(sink.submissions()[0], state);
        assert_eq!(sink.last(), Some(&FormState::default()));
    }
}
