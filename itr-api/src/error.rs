use thiserror::Error;

/// Failures talking to the calculation/generation service.
///
/// Surfaced to the user with the raw service message when one is
/// available; the caller renders a generic fallback otherwise.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("service returned {0}: {1}")]
    Api(u16, String),

    #[error("failed to parse service response: {0}")]
    Parse(String),
}
