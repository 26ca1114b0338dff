//! Counter store error types.

/// Kinds of counter store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// The store could not be reached
    #[display("Counter store unavailable: {}", _0)]
    Unavailable(String),
    /// The stored value is not a counter
    #[display("Counter value is corrupt: {}", _0)]
    Corrupt(String),
    /// The key is not a valid counter key
    #[display("Invalid counter key: {}", _0)]
    InvalidKey(String),
}

/// Counter store error with location tracking.
///
/// # Examples
///
/// ```
/// use mingus_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::Unavailable("connection refused".to_string()));
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoreErrorKind {
        &self.kind
    }
}

/// Result type for counter store operations.
pub type StoreResult<T> = Result<T, StoreError>;
