//! Error types for `folio-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. The login throttle is the
//! exception: every one of its outcomes is a plain value.

/// Unified error type for all core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A record with the same unique key already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Input failed validation. The message is safe to show to end users.
    #[error("{0}")]
    Validation(String),
}

/// Convenience alias used throughout `folio-core`.
pub type CoreResult<T> = Result<T, CoreError>;
