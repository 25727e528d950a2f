use thiserror::Error;

/// Reasons a learner submission is rejected before any turn is appended or
/// any network call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("input is empty after trimming")]
    EmptyInput,
    #[error("session has not been started")]
    NotStarted,
    #[error("a step request is already in flight")]
    StepInFlight,
}
