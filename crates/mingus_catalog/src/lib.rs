//! Tier catalog for MINGUS feature access.
//!
//! The catalog maps each subscription tier to its feature set, usage limits
//! and price. It is loaded once at startup from layered TOML configuration,
//! validated, and never written afterwards:
//!
//! ```no_run
//! use mingus_catalog::TierCatalog;
//! use mingus_core::Tier;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = TierCatalog::load()?;
//! for feature in catalog.features_for(Tier::MidTier) {
//!     println!("{}", feature.feature_id());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;

pub use catalog::{TierCatalog, TierDefinition};
pub use config::{FeatureConfig, MingusConfig, TierConfig};
