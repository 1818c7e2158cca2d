use thiserror::Error;

/// Error type for password operations.
///
/// Verification never surfaces these to callers; they only describe why a
/// stored hash was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("System entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Unsupported password hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
