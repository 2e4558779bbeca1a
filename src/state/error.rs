//! State management-specific error types.

use crate::validation::FieldErrors;

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Submit requested while an attempt is still in flight
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// Outcome delivered with no attempt in flight
    #[error("No submission is in progress")]
    NoSubmissionInFlight,

    /// Form already accepted
    #[error("The form has already been submitted")]
    FormSubmitted,

    /// Snapshot failed validation
    #[error("The form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    /// Network thread is gone
    #[error("Network event channel closed")]
    NetworkChannelClosed,
}
