//! Error taxonomy for BCCMS operations
//!
//! All violations surface synchronously as typed results and are never
//! retried by the core. Each variant carries a stable code so callers
//! can branch on the error kind without parsing messages.

use crate::{ComplaintId, ComplaintStatus, Role, UserId};

/// Errors that can occur in registry and workflow operations
#[derive(Debug, thiserror::Error)]
pub enum BccmsError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Complaint not found: {0}")]
    ComplaintNotFound(String),

    #[error("Role {role} may not perform '{operation}'")]
    PermissionDenied { role: Role, operation: String },

    #[error("Operation '{operation}' is not valid while the complaint is {status}")]
    InvalidTransition {
        status: ComplaintStatus,
        operation: String,
    },

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Feedback already submitted for the current resolution of complaint {0}")]
    DuplicateFeedback(ComplaintId),

    #[error("Registry lock poisoned")]
    LockPoisoned,
}

impl BccmsError {
    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            BccmsError::UserNotFound(_) | BccmsError::ComplaintNotFound(_) => "NOT_FOUND",
            BccmsError::PermissionDenied { .. } => "PERMISSION_DENIED",
            BccmsError::InvalidTransition { .. } => "INVALID_TRANSITION",
            BccmsError::ValidationError(_) => "VALIDATION_ERROR",
            BccmsError::DuplicateFeedback(_) => "DUPLICATE_FEEDBACK",
            BccmsError::LockPoisoned => "LOCK_POISONED",
        }
    }
}

/// Result type alias for BCCMS operations
pub type BccmsResult<T> = Result<T, BccmsError>;
