//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, StoreError, UsageError};

/// Every error a MINGUS crate can surface.
///
/// # Examples
///
/// ```
/// use mingus_error::{ConfigError, MingusError};
///
/// let err: MingusError = ConfigError::new("bad catalog").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MingusErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Counter store error
    #[from(StoreError)]
    Store(StoreError),
    /// Usage tracking error
    #[from(UsageError)]
    Usage(UsageError),
    /// JSON serialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// MINGUS error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Mingus Error: {}", _0)]
pub struct MingusError(Box<MingusErrorKind>);

impl MingusError {
    /// Create a new error from a kind.
    pub fn new(kind: MingusErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MingusErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MingusErrorKind
impl<T> From<T> for MingusError
where
    T: Into<MingusErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for MINGUS operations.
pub type MingusResult<T> = std::result::Result<T, MingusError>;
