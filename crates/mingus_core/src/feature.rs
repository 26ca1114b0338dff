//! Feature definitions.

use crate::Tier;
use serde::{Deserialize, Serialize};

/// Grouping used when presenting features to users.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeatureCategory {
    /// Dashboards and spending analytics
    Analytics,
    /// Budgets, bills and cash-flow planning
    Budgeting,
    /// Career risk, salary and job tools
    Career,
    /// Health and wellness check-ins
    Wellness,
    /// AI-generated insights
    AiInsights,
    /// Exportable financial reports
    Reports,
    /// Support channels
    Support,
}

/// A named capability gated behind a minimum tier.
///
/// Built once when the catalog loads and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use mingus_core::{FeatureCategory, FeatureDefinitionBuilder, Tier};
///
/// let feature = FeatureDefinitionBuilder::default()
///     .feature_id("salary_negotiation")
///     .required_tier(Tier::Professional)
///     .category(FeatureCategory::Career)
///     .build()
///     .unwrap();
///
/// assert!(!feature.is_available_to(Tier::MidTier));
/// assert!(feature.is_available_to(Tier::Professional));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct FeatureDefinition {
    /// Stable identifier, e.g. `ai_insights`
    feature_id: String,
    /// Lowest tier that may use the feature
    required_tier: Tier,
    /// Presentation category
    category: FeatureCategory,
    /// One-line description for upgrade prompts
    #[builder(default)]
    description: String,
    /// Key into the tier limits table, when usage is metered
    #[builder(default, setter(into, strip_option))]
    usage_limit: Option<String>,
}

impl FeatureDefinition {
    /// Whether a user on `tier` may use this feature.
    pub fn is_available_to(&self, tier: Tier) -> bool {
        tier.satisfies(self.required_tier)
    }

    /// The usage limit key, if the feature is metered.
    pub fn usage_limit_key(&self) -> Option<&str> {
        self.usage_limit.as_deref()
    }
}
