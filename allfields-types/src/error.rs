/// Error type for form operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// User cancelled the form (Esc, closed window, etc.)
    #[error("Form cancelled by user")]
    Cancelled,

    /// Backend-specific failure (I/O, UI framework crash, etc.)
    #[error("Backend error: {0}")]
    Backend(#[source] anyhow::Error),

    /// The submission sink refused the form.
    #[error("Submission failed: {0}")]
    Sink(#[source] anyhow::Error),
}

impl FormError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(FormError::Cancelled.to_string(), "Form cancelled by user");
        assert_eq!(
            FormError::backend(anyhow::anyhow!("terminal gone")).to_string(),
            "Backend error: terminal gone"
        );
        assert_eq!(
            FormError::Sink(anyhow::anyhow!("503")).to_string(),
            "Submission failed: 503"
        );
    }

    #[test]
    fn cancellation() {
        assert!(FormError::Cancelled.is_cancelled());
        assert!(!FormError::backend(anyhow::anyhow!("x")).is_cancelled());
    }
}
