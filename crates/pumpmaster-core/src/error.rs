//! Error types for the PumpMaster application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire PumpMaster application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Each variant maps to a
/// stable wire code (see [`PumpMasterError::code`]) that the view layer
/// displays alongside the message.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PumpMasterError {
    /// Persisted token could not be decoded (segment count, base64, JSON)
    #[error("Malformed token: {reason}")]
    MalformedToken { reason: String },

    /// Persisted token expired (`exp * 1000 < now_ms`)
    #[error("Token expired")]
    ExpiredToken,

    /// Persisted token decoded but a required claim is absent
    #[error("Token is missing required claim '{claim}'")]
    MissingTokenClaim { claim: &'static str },

    /// Login rejected by the auth collaborator
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Auth collaborator failed for a reason other than bad credentials
    #[error("Internal server error: {0}")]
    AuthInternal(String),

    /// List page fetch failed
    #[error("Failed to fetch pumps: {0}")]
    FetchFailure(String),

    /// Bulk delete mutation failed
    #[error("Failed to delete pumps: {0}")]
    DeleteFailure(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Rejected interaction-mode jump (Edit and Delete must pass through Normal)
    #[error("Cannot switch mode from {from} to {to} directly")]
    ModeTransition { from: String, to: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PumpMasterError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MalformedToken error
    pub fn malformed_token(reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
        }
    }

    /// Creates a MissingTokenClaim error
    pub fn missing_claim(claim: &'static str) -> Self {
        Self::MissingTokenClaim { claim }
    }

    /// Creates an AuthInternal error
    pub fn auth_internal(message: impl Into<String>) -> Self {
        Self::AuthInternal(message.into())
    }

    /// Creates a FetchFailure error
    pub fn fetch_failure(message: impl Into<String>) -> Self {
        Self::FetchFailure(message.into())
    }

    /// Creates a DeleteFailure error
    pub fn delete_failure(message: impl Into<String>) -> Self {
        Self::DeleteFailure(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a ModeTransition error
    pub fn mode_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::ModeTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is any of the token-validity errors handled silently
    /// during session restoration
    pub fn is_token_invalid(&self) -> bool {
        matches!(
            self,
            Self::MalformedToken { .. } | Self::ExpiredToken | Self::MissingTokenClaim { .. }
        )
    }

    /// Check if this is an InvalidCredentials error
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns the stable wire code for this error.
    ///
    /// These are the codes the view layer renders next to the message, and
    /// the codes the fixture collaborators use in their structured error
    /// responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedToken { .. } => "TOKEN_MALFORMED",
            Self::ExpiredToken => "TOKEN_EXPIRED",
            Self::MissingTokenClaim { .. } => "TOKEN_CLAIM_MISSING",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AuthInternal(_) => "INTERNAL_ERROR",
            Self::FetchFailure(_) => "FETCH_ERROR",
            Self::DeleteFailure(_) => "DELETE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ModeTransition { .. } => "MODE_TRANSITION",
            Self::Io { .. } => "IO_ERROR",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PumpMasterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PumpMasterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PumpMasterError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PumpMasterError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for PumpMasterError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for PumpMasterError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, PumpMasterError>`.
pub type Result<T> = std::result::Result<T, PumpMasterError>;
