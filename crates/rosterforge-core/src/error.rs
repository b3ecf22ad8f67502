//! Error types for RosterForge

use thiserror::Error;

/// Main error type for RosterForge operations
#[derive(Debug, Error)]
pub enum RosterForgeError {
    /// The fact set or the solver configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// A domain object is inconsistent with the rest of the model
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Error during score calculation
    #[error("Score calculation error: {0}")]
    ScoreCalculation(String),

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for RosterForge operations
pub type Result<T> = std::result::Result<T, RosterForgeError>;
