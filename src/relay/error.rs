//! Relay-specific error types.

/// Errors that can occur while constructing a relay.
///
/// Submission itself never fails with an error: every failure is translated
/// into an [`Outcome::Failure`](super::Outcome::Failure).
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// HTTP client could not be created
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Configured endpoint is not a usable URL
    #[error("Invalid storage endpoint: {0}")]
    InvalidEndpoint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_error_display() {
        let error = RelayError::InvalidEndpoint("relative URL without a base".to_string());
        assert!(error.to_string().contains("Invalid storage endpoint"));
        assert!(error.to_string().contains("relative URL"));
    }
}
