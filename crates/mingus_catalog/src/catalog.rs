//! The validated, immutable tier catalog.

use crate::MingusConfig;
use mingus_core::{
    FeatureCategory, FeatureDefinition, FeatureDefinitionBuilder, Tier, TierLimits, UsageLimit,
    UsageSettings,
};
use mingus_error::{ConfigError, MingusResult};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// A tier's price and usage limits.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct TierDefinition {
    tier: Tier,
    display_name: String,
    monthly_price: f64,
    yearly_price: Option<f64>,
    limits: TierLimits,
}

/// Immutable lookup from tier to feature set, limits and price.
///
/// Construction validates every cross reference, so lookups at request time
/// never encounter a dangling tier or limit key. Share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TierCatalog {
    /// Indexed by `Tier::rank`
    tiers: Vec<TierDefinition>,
    features: BTreeMap<String, FeatureDefinition>,
    usage: UsageSettings,
}

impl TierCatalog {
    /// Load layered configuration and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if loading or validation fails.
    pub fn load() -> MingusResult<Self> {
        Self::from_config(&MingusConfig::load()?)
    }

    /// Build the catalog from the bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bundled catalog is invalid.
    pub fn bundled() -> MingusResult<Self> {
        Self::from_config(&MingusConfig::bundled()?)
    }

    /// Validate configuration and build the catalog.
    ///
    /// # Errors
    ///
    /// Fails when a tier key is unknown or missing, a feature names an unknown
    /// tier or category, a feature's usage limit key is missing from any tier,
    /// a limit is below -1, a price is negative, or the usage settings are invalid.
    #[instrument(skip(config), fields(tiers = config.tiers.len(), features = config.features.len()))]
    pub fn from_config(config: &MingusConfig) -> MingusResult<Self> {
        config
            .usage
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid [usage] settings: {}", e)))?;

        let mut by_tier: BTreeMap<Tier, TierDefinition> = BTreeMap::new();
        for (name, tier_config) in &config.tiers {
            let tier: Tier = name
                .parse()
                .map_err(|_| ConfigError::new(format!("Unknown tier '{}' in [tiers]", name)))?;
            if by_tier.contains_key(&tier) {
                return Err(ConfigError::new(format!("Tier '{}' is defined twice", tier)).into());
            }

            check_price(name, "monthly_price", tier_config.monthly_price)?;
            if let Some(yearly) = tier_config.yearly_price {
                check_price(name, "yearly_price", yearly)?;
            }

            let mut limits = BTreeMap::new();
            for (key, raw) in &tier_config.limits {
                let limit = UsageLimit::try_from(*raw).map_err(|e| {
                    ConfigError::new(format!("Tier '{}' limit '{}': {}", name, key, e))
                })?;
                limits.insert(key.clone(), limit);
            }

            by_tier.insert(
                tier,
                TierDefinition {
                    tier,
                    display_name: tier_config.display_name.clone(),
                    monthly_price: tier_config.monthly_price,
                    yearly_price: tier_config.yearly_price,
                    limits: TierLimits::from(limits),
                },
            );
        }

        let mut tiers = Vec::with_capacity(by_tier.len());
        for tier in Tier::all() {
            let definition = by_tier
                .remove(&tier)
                .ok_or_else(|| ConfigError::new(format!("Tier '{}' is missing from [tiers]", tier)))?;
            tiers.push(definition);
        }

        let mut features = BTreeMap::new();
        for (feature_id, feature_config) in &config.features {
            if feature_id.trim().is_empty() {
                return Err(ConfigError::new("Feature ids must not be empty").into());
            }

            let required_tier: Tier = feature_config.required_tier.parse().map_err(|_| {
                ConfigError::new(format!(
                    "Feature '{}' requires unknown tier '{}'",
                    feature_id, feature_config.required_tier
                ))
            })?;
            let category: FeatureCategory = feature_config.category.parse().map_err(|_| {
                ConfigError::new(format!(
                    "Feature '{}' has unknown category '{}'",
                    feature_id, feature_config.category
                ))
            })?;

            if let Some(key) = &feature_config.usage_limit {
                if let Some(missing) = tiers.iter().find(|t| !t.limits.contains(key)) {
                    return Err(ConfigError::new(format!(
                        "Feature '{}' uses limit '{}' which tier '{}' does not define",
                        feature_id, key, missing.tier
                    ))
                    .into());
                }
            }

            let mut builder = FeatureDefinitionBuilder::default();
            builder
                .feature_id(feature_id.clone())
                .required_tier(required_tier)
                .category(category)
                .description(feature_config.description.clone());
            if let Some(key) = &feature_config.usage_limit {
                builder.usage_limit(key.clone());
            }
            let definition = builder.build().map_err(|e| {
                ConfigError::new(format!("Feature '{}' is incomplete: {}", feature_id, e))
            })?;

            debug!(feature_id, %required_tier, %category, "Registered feature");
            features.insert(feature_id.clone(), definition);
        }

        info!(features = features.len(), "Tier catalog loaded");

        Ok(Self {
            tiers,
            features,
            usage: config.usage.clone(),
        })
    }

    /// The definition for a tier.
    pub fn tier(&self, tier: Tier) -> &TierDefinition {
        &self.tiers[tier.rank() as usize]
    }

    /// All tier definitions in ascending order.
    pub fn tiers(&self) -> impl Iterator<Item = &TierDefinition> {
        self.tiers.iter()
    }

    /// Look up a feature by id.
    pub fn feature(&self, feature_id: &str) -> Option<&FeatureDefinition> {
        self.features.get(feature_id)
    }

    /// All features, ordered by id.
    pub fn features(&self) -> impl Iterator<Item = &FeatureDefinition> {
        self.features.values()
    }

    /// The feature set of a tier: every feature it ranks high enough for.
    pub fn features_for(&self, tier: Tier) -> Vec<&FeatureDefinition> {
        self.features
            .values()
            .filter(|f| f.is_available_to(tier))
            .collect()
    }

    /// A tier's limit for a limit key.
    pub fn limit(&self, tier: Tier, limit_key: &str) -> Option<UsageLimit> {
        self.tier(tier).limits.get(limit_key)
    }

    /// A tier's limit for a feature.
    ///
    /// `None` when the feature is unknown; `Unlimited` when it is not metered.
    pub fn limit_for_feature(&self, tier: Tier, feature_id: &str) -> Option<UsageLimit> {
        let feature = self.feature(feature_id)?;
        match feature.usage_limit_key() {
            Some(key) => self.limit(tier, key),
            None => Some(UsageLimit::Unlimited),
        }
    }

    /// Monthly price of a tier.
    pub fn price(&self, tier: Tier) -> f64 {
        self.tier(tier).monthly_price
    }

    /// Usage tracker settings loaded alongside the catalog.
    pub fn usage_settings(&self) -> &UsageSettings {
        &self.usage
    }
}

fn check_price(tier: &str, field: &str, price: f64) -> Result<(), ConfigError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ConfigError::new(format!(
            "Tier '{}' {} must be a non-negative amount, got {}",
            tier, field, price
        )));
    }
    Ok(())
}
