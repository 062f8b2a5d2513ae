use std::fmt;
use thiserror::Error;

/// The error type for postsign operations.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Access key id or secret access key is absent or empty.
    CredentialMissing,

    /// Temporary credentials are expired (or about to expire).
    CredentialExpired,

    /// Region is not a recognized region token.
    RegionInvalid,

    /// The wall clock produced an unusable timestamp.
    ClockInvalid,

    /// The policy document could not be encoded or decoded.
    PolicyInvalid,

    /// Unexpected errors.
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this is a credential error.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::CredentialMissing | ErrorKind::CredentialExpired
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a credential missing error.
    pub fn credential_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialMissing, message)
    }

    /// Create a credential expired error.
    pub fn credential_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialExpired, message)
    }

    /// Create a region invalid error.
    pub fn region_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RegionInvalid, message)
    }

    /// Create a clock invalid error.
    pub fn clock_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ClockInvalid, message)
    }

    /// Create a policy invalid error.
    pub fn policy_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PolicyInvalid, message)
    }

    /// Create an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialMissing => write!(f, "missing credentials"),
            ErrorKind::CredentialExpired => write!(f, "expired credentials"),
            ErrorKind::RegionInvalid => write!(f, "invalid region"),
            ErrorKind::ClockInvalid => write!(f, "invalid clock reading"),
            ErrorKind::PolicyInvalid => write!(f, "invalid policy document"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::policy_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::time::SystemTimeError> for Error {
    fn from(err: std::time::SystemTimeError) -> Self {
        Self::clock_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
