//! Per-period feature usage tracking.
//!
//! Counters live in an external [`CounterStore`]; the tracker only builds
//! keys, increments, reads, and compares counts against the tier limits in
//! the catalog. The store is injected at construction so tests and
//! deployments choose their own backend.
//!
//! # Example
//!
//! ```
//! use mingus_catalog::TierCatalog;
//! use mingus_core::Tier;
//! use mingus_usage::{InMemoryCounterStore, UsageTracker};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(TierCatalog::bundled()?);
//! let tracker = UsageTracker::new(catalog, Arc::new(InMemoryCounterStore::new()));
//!
//! let count = tracker.increment("user-42", "ai_insights", "2025-01").await?;
//! let left = tracker.remaining("user-42", "ai_insights", "2025-01", Tier::Budget).await?;
//! assert_eq!(count, 1);
//! assert_eq!(left, Some(9));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod quota;
mod store;
mod tracker;

pub use mingus_error::{StoreError, StoreErrorKind, StoreResult, UsageError, UsageErrorKind, UsageResult};
pub use quota::QuotaStatus;
pub use store::{CounterStore, InMemoryCounterStore};
pub use tracker::UsageTracker;
