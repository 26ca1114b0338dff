//! MINGUS feature access.
//!
//! Subscription tier feature gating with per-period usage limits for the
//! MINGUS personal finance and wellness app.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mingus::{FeatureGate, Tier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gate = FeatureGate::load()?;
//!
//!     let decision = gate.consume("user-42", Tier::MidTier, "ai_insights").await;
//!     if decision.has_access {
//!         println!("{:?} insights left this month", decision.remaining_quota);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `mingus_error` - Error types
//! - `mingus_core` - Tiers, features, limits and decisions
//! - `mingus_catalog` - Configuration loading and the tier catalog
//! - `mingus_access` - Tier-based access evaluation
//! - `mingus_usage` - Usage counters and quota checks
//!
//! This crate re-exports everything and adds [`FeatureGate`], which combines
//! the access check with the usage check.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gate;
mod telemetry;

pub use gate::FeatureGate;
pub use telemetry::init_telemetry;

pub use mingus_access::AccessEvaluator;
pub use mingus_catalog::{FeatureConfig, MingusConfig, TierCatalog, TierConfig, TierDefinition};
pub use mingus_core::{
    AccessDecision, AccessReason, FeatureCategory, FeatureDefinition, StoreFailurePolicy, Tier,
    TierLimits, UpgradeOffer, UsageLimit, UsagePeriod, UsageSettings,
};
pub use mingus_error::{
    ConfigError, JsonError, MingusError, MingusErrorKind, MingusResult, StoreError,
    StoreErrorKind, UsageError, UsageErrorKind,
};
pub use mingus_usage::{CounterStore, InMemoryCounterStore, QuotaStatus, UsageTracker};
