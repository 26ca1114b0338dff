//! Error types for the MINGUS feature-access workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Access denials are not errors. A missing feature or a malformed tier is
//! reported through an access decision so callers can render upgrade prompts;
//! only configuration, counter store and serialization failures surface here.
//!
//! # Examples
//!
//! ```
//! use mingus_error::{ConfigError, MingusResult};
//!
//! fn load() -> MingusResult<()> {
//!     Err(ConfigError::new("tier 'budget' is missing"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod store;
mod usage;

pub use config::ConfigError;
pub use error::{MingusError, MingusErrorKind, MingusResult};
pub use json::JsonError;
pub use store::{StoreError, StoreErrorKind, StoreResult};
pub use usage::{UsageError, UsageErrorKind, UsageResult};
