//! Usage tracking error types.

use crate::StoreError;

/// Usage tracking error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UsageErrorKind {
    /// The feature is not defined in the catalog
    #[display("Feature not found: {}", _0)]
    FeatureNotFound(String),
    /// The counter store failed; kept apart from quota exhaustion
    #[display("Counter store unavailable: {}", _0)]
    StoreUnavailable(String),
}

/// Usage tracking error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Usage Error: {} at line {} in {}", kind, line, file)]
pub struct UsageError {
    /// The specific error kind
    pub kind: UsageErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl UsageError {
    /// Create a new usage error with location tracking.
    #[track_caller]
    pub fn new(kind: UsageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UsageErrorKind {
        &self.kind
    }

    /// Whether the failure came from the counter store.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self.kind, UsageErrorKind::StoreUnavailable(_))
    }
}

impl From<StoreError> for UsageError {
    #[track_caller]
    fn from(err: StoreError) -> Self {
        UsageError::new(UsageErrorKind::StoreUnavailable(err.kind.to_string()))
    }
}

/// Result type for usage tracking operations.
pub type UsageResult<T> = Result<T, UsageError>;
