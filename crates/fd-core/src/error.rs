//! # AppError
//!
//! Centralized error handling for the Fender ecosystem.
//! No variant is fatal: every failure degrades to a visible, recoverable
//! state at the call site.

use thiserror::Error;

/// The primary error type for all fd-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Article by id)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty article title, empty broadcast).
    /// Rejected before any store call is made.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Access-gate failure (wrong email or password)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure (store unreachable, quota, permission)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Fender logic.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Wraps a store-layer failure. The underlying cause is retained in the
    /// message for diagnostics; callers surface a transient inline error.
    pub fn store(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
