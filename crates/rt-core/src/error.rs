//! # AppError
//!
//! Centralized error handling for the Rusty-Tickets ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

use crate::validation::FieldErrors;

/// The primary error type for all rt-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Ticket)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// A single malformed value (e.g., unknown status string)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// One or more form fields failed validation
    #[error("invalid form: {0}")]
    InvalidForm(FieldErrors),

    /// Registration with an email that is already taken
    #[error("user with email {0} already exists")]
    DuplicateEmail(String),

    /// No user matches the supplied email and password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Infrastructure failure (e.g., unreadable data dir, hashing failure)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Rusty-Tickets logic.
pub type Result<T> = std::result::Result<T, AppError>;
