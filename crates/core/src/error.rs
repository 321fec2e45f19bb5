//! Domain error model.

use thiserror::Error;

/// Result type used across the auth core.
pub type CoreResult<T> = Result<T, CoreError>;

/// Boundary error taxonomy.
///
/// Every failure that crosses the core boundary is one of these variants;
/// low-level hashing/decoding errors are mapped before they get here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Missing/invalid/expired credentials or token.
    ///
    /// The message is deliberately uniform so callers cannot tell "unknown
    /// identifier" apart from "wrong secret".
    #[error("invalid credentials")]
    Unauthorized,

    /// Authenticated but not allowed to perform the operation.
    #[error("insufficient role or permissions")]
    Forbidden,

    /// A uniqueness constraint was violated (e.g. duplicate identifier).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An internal failure whose details must not leak to callers.
    #[error("internal error")]
    Internal,
}

impl CoreError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
