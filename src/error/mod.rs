use thiserror::Error;

/// Error types for the MediSage library.
///
/// Every failure of a cause-generation call surfaces as one of these variants.
/// The library performs no local recovery: callers decide what to show the user.
///
/// # Examples
///
/// Distinguishing failure kinds:
///
/// ```
/// use medisage::{MediSageError, Result};
///
/// fn describe(result: Result<String>) -> &'static str {
///     match result {
///         Ok(_) => "ok",
///         Err(MediSageError::BackendUnavailable(_)) => "backend down",
///         Err(MediSageError::MalformedResponse(_)) => "bad reply",
///         Err(MediSageError::Cancelled) => "cancelled",
///         Err(_) => "other",
///     }
/// }
///
/// assert_eq!(describe(Err(MediSageError::Cancelled)), "cancelled");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediSageError {
    /// The generative-text backend could not be reached or refused the request
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend replied, but the reply does not have the required shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The caller withdrew the request before the backend replied
    #[error("Request cancelled")]
    Cancelled,

    /// Client misconfiguration, such as a missing API key
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The condition catalog backend failed
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
}

/// A specialized Result type for MediSage operations.
pub type Result<T> = std::result::Result<T, MediSageError>;
