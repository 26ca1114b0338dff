//! Core data types for MINGUS subscription tiers and feature access.
//!
//! This crate holds the value types shared by the catalog, the access
//! evaluator and the usage tracker. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod decision;
mod feature;
mod limits;
mod period;
mod settings;
mod tier;

pub use decision::{AccessDecision, AccessReason, UpgradeOffer};
pub use feature::{FeatureCategory, FeatureDefinition, FeatureDefinitionBuilder};
pub use limits::{TierLimits, UNLIMITED, UsageLimit};
pub use period::UsagePeriod;
pub use settings::{MAX_COUNTER_TTL_SECS, StoreFailurePolicy, UsageSettings, UsageSettingsBuilder};
pub use tier::Tier;
