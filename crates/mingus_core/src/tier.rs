//! Subscription tiers.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// MINGUS subscription tiers.
///
/// Tiers are strictly ordered: `Budget < MidTier < Professional`. A feature
/// gated at some tier is available to that tier and every tier above it.
///
/// # Examples
///
/// ```
/// use mingus_core::Tier;
///
/// let tier: Tier = "mid-tier".parse().unwrap();
/// assert_eq!(tier, Tier::MidTier);
/// assert!(Tier::Budget < Tier::Professional);
/// assert_eq!(tier.to_string(), "mid_tier");
/// ```
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
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Tier {
    /// Entry tier, $15/month
    Budget,
    /// Middle tier, $35/month
    #[serde(alias = "mid-tier")]
    #[strum(to_string = "mid_tier", serialize = "mid-tier")]
    MidTier,
    /// Top tier, $100/month
    Professional,
}

impl Tier {
    /// Ordinal rank used for access comparisons.
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Budget => 0,
            Tier::MidTier => 1,
            Tier::Professional => 2,
        }
    }

    /// The tier directly above this one, if any.
    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Budget => Some(Tier::MidTier),
            Tier::MidTier => Some(Tier::Professional),
            Tier::Professional => None,
        }
    }

    /// Whether this tier ranks at or above `required`.
    pub fn satisfies(&self, required: Tier) -> bool {
        self.rank() >= required.rank()
    }

    /// Human-facing name for upgrade prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Budget => "Budget",
            Tier::MidTier => "Mid-Tier",
            Tier::Professional => "Professional",
        }
    }

    /// All tiers in ascending order.
    pub fn all() -> Vec<Tier> {
        Tier::iter().collect()
    }
}
