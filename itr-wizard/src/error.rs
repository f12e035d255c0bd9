use itr_api::ServiceError;
use itr_core::models::WizardStep;
use thiserror::Error;

/// Controller-level failures.
///
/// `Validation` and `Service` are surfaced to the user with an
/// actionable message; persistence problems never appear here — they
/// are absorbed and logged, and the in-memory state stays authoritative.
#[derive(Debug, Error)]
pub enum WizardError {
    /// One or more required fields were absent from a step payload.
    /// Local and recoverable: the user corrects the input and retries.
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    /// The requested transition is not legal from the current position.
    #[error("cannot submit step {from:?} while the wizard is at {current:?}")]
    InvalidTransition {
        from: WizardStep,
        current: WizardStep,
    },

    /// A second request was attempted while one is still outstanding.
    /// Rejected rather than queued, so two divergent results can never
    /// race to set the wizard state.
    #[error("a service request is already in flight")]
    RequestInFlight,

    /// The tax calculation has not completed for the current data.
    #[error("tax calculation must complete before this step")]
    CalculationRequired,

    /// No successfully generated return is available.
    #[error("no generated return is available to download")]
    GenerationRequired,

    /// The external service failed; retryable by the user.
    #[error(transparent)]
    Service(#[from] ServiceError),
}
