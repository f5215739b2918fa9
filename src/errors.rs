//! Unified error type for the points-transfer backend.
//!
//! Every core operation returns [`Result`]. Transport code maps each variant to a
//! response; the core itself never deals in status codes.

use thiserror::Error;

/// Which unique field collided during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    /// Login e-mail address
    Email,
    /// Public member identifier
    MemberId,
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::MemberId => f.write_str("member_id"),
        }
    }
}

/// All failures the backend can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input
    #[error("{message}")]
    InvalidRequest {
        /// Human-readable reason
        message: String,
    },

    /// Sender and recipient are the same member
    #[error("cannot transfer to yourself")]
    SelfTransfer,

    /// Sender balance does not cover the transfer
    #[error("insufficient points: have {available}, need {required}")]
    InsufficientFunds {
        /// Points the sender holds
        available: i64,
        /// Points the transfer asked for
        required: i64,
    },

    /// No account carries the requested member identifier
    #[error("recipient not found")]
    RecipientNotFound {
        /// The member identifier that was looked up
        member_id: String,
    },

    /// Registration collided with an existing account
    #[error("{field} already registered")]
    Duplicate {
        /// The colliding field
        field: DuplicateField,
    },

    /// Storage failed inside the transfer unit; nothing was applied
    #[error("failed to complete transfer")]
    TransferFailed {
        /// Underlying database error
        #[source]
        source: sea_orm::DbErr,
    },

    /// Caller identity could not be established
    #[error("unauthorized")]
    Unauthenticated,

    /// Wrong e-mail or password at login
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Lookup by member identifier found nothing
    #[error("user not found")]
    NotFound {
        /// The member identifier that was looked up
        member_id: String,
    },

    /// Caller tried to look up their own member identifier
    #[error("cannot search for yourself")]
    SelfLookup,

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable reason
        message: String,
    },

    /// Password hashing or verification failed for a reason other than mismatch
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Token could not be issued
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Database error outside a transfer unit
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (listener binding, serving)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convenience constructor for [`Error::InvalidRequest`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
