//! Configuration structures for the tier catalog.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from mingus.toml)
//! - User overrides (./mingus.toml or ~/.config/mingus/mingus.toml)
//! - Environment overrides (`MINGUS_USAGE__FAILURE_POLICY=fail_open`)
//!
//! Values here are raw: tier and category names stay strings until
//! [`TierCatalog::from_config`](crate::TierCatalog::from_config) validates
//! them, so a typo surfaces as a configuration error naming the feature.

use config::{Config, Environment, File, FileFormat};
use mingus_core::UsageSettings;
use mingus_error::{ConfigError, MingusError, MingusResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../mingus.toml");

/// Configuration for one subscription tier.
///
/// ```toml
/// [tiers.mid_tier]
/// display_name = "Mid-Tier"
/// monthly_price = 35.0
///
/// [tiers.mid_tier.limits]
/// ai_insights_per_month = 50
/// health_checkins_per_month = -1   # unlimited
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TierConfig {
    /// Name shown in upgrade prompts
    pub display_name: String,

    /// Monthly price in USD
    pub monthly_price: f64,

    /// Yearly price in USD, when offered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_price: Option<f64>,

    /// Usage limits by key; -1 means unlimited
    #[serde(default)]
    pub limits: BTreeMap<String, i64>,
}

/// Configuration for one feature.
///
/// ```toml
/// [features.salary_negotiation]
/// required_tier = "professional"
/// category = "career"
/// usage_limit = "salary_negotiation_sessions_per_month"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureConfig {
    /// Lowest tier allowed to use the feature
    pub required_tier: String,

    /// Presentation category
    pub category: String,

    /// One-line description
    #[serde(default)]
    pub description: String,

    /// Limit key in each tier's `limits` table, when usage is metered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<String>,
}

/// Top-level MINGUS configuration.
///
/// # Example
///
/// ```no_run
/// use mingus_catalog::MingusConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MingusConfig::load()?;
/// let budget = config.tiers.get("budget").unwrap();
/// println!("Budget tier: ${}/month", budget.monthly_price);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct MingusConfig {
    /// Usage tracker settings
    #[serde(default)]
    pub usage: UsageSettings,

    /// Tier name to tier configuration
    #[serde(default)]
    pub tiers: BTreeMap<String, TierConfig>,

    /// Feature id to feature configuration
    #[serde(default)]
    pub features: BTreeMap<String, FeatureConfig>,
}

impl MingusConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> MingusResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                MingusError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                MingusError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or does not match the schema.
    pub fn from_toml_str(source: &str) -> MingusResult<Self> {
        toml::from_str(source).map_err(|e| {
            MingusError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
    }

    /// The bundled defaults alone, ignoring user files and environment.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file is malformed.
    pub fn bundled() -> MingusResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Load configuration with precedence: environment > user files > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (mingus.toml shipped with the library)
    /// 2. User config in home directory (~/.config/mingus/mingus.toml)
    /// 3. User config in current directory (./mingus.toml)
    /// 4. `MINGUS_*` environment variables, `__` separating nested keys
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> MingusResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/mingus/mingus.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("mingus").required(false))
            .add_source(
                Environment::with_prefix("MINGUS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .map_err(|e| {
                MingusError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                MingusError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Render the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be represented in TOML.
    pub fn to_toml_string(&self) -> MingusResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            MingusError::from(ConfigError::new(format!(
                "Failed to render configuration: {}",
                e
            )))
        })
    }
}
