//! Access decisions.

use crate::Tier;
use serde::{Deserialize, Serialize};

/// Why an access decision came out the way it did.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccessReason {
    /// The tier includes the feature and quota allows use
    Granted,
    /// The feature needs a higher tier
    UpgradeRequired,
    /// The feature id is not in the catalog
    FeatureNotFound,
    /// The tier value could not be parsed
    InvalidTier,
    /// The tier includes the feature but this period's quota is spent
    QuotaExceeded,
    /// The counter store could not be reached
    StoreUnavailable,
}

/// Upgrade metadata attached to a denied decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOffer {
    /// Tier to upgrade to
    pub target_tier: Tier,
    /// Monthly price of the target tier
    pub target_monthly_price: f64,
    /// Monthly price difference from the current tier
    pub price_difference: f64,
}

/// The result of evaluating a tier against a feature.
///
/// Produced per call and never persisted.
///
/// # Examples
///
/// ```
/// use mingus_core::{AccessDecision, AccessReason, Tier};
///
/// let decision = AccessDecision::granted(Tier::Budget).with_remaining_quota(Some(9));
/// assert!(decision.has_access);
/// assert_eq!(decision.reason, AccessReason::Granted);
/// assert_eq!(decision.remaining_quota, Some(9));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether the feature may be used
    pub has_access: bool,
    /// Reason for the outcome
    pub reason: AccessReason,
    /// Tier the feature requires; `None` when the feature is unknown
    pub required_tier: Option<Tier>,
    /// Uses left this period; `None` when unlimited or not evaluated
    pub remaining_quota: Option<i64>,
    /// Upgrade metadata for upgrade prompts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade: Option<UpgradeOffer>,
}

impl AccessDecision {
    /// Access granted by tier.
    pub fn granted(required_tier: Tier) -> Self {
        Self::allow(AccessReason::Granted, Some(required_tier))
    }

    /// Access denied because the feature needs a higher tier.
    pub fn upgrade_required(required_tier: Tier, upgrade: Option<UpgradeOffer>) -> Self {
        Self {
            upgrade,
            ..Self::deny(AccessReason::UpgradeRequired, Some(required_tier))
        }
    }

    /// Access denied because the feature is unknown.
    pub fn feature_not_found() -> Self {
        Self::deny(AccessReason::FeatureNotFound, None)
    }

    /// Access denied because the tier value was malformed.
    pub fn invalid_tier(required_tier: Option<Tier>) -> Self {
        Self::deny(AccessReason::InvalidTier, required_tier)
    }

    /// Access denied because the period quota is spent.
    pub fn quota_exceeded(required_tier: Tier) -> Self {
        Self {
            remaining_quota: Some(0),
            ..Self::deny(AccessReason::QuotaExceeded, Some(required_tier))
        }
    }

    /// The counter store failed; `allowed` carries the failure policy outcome.
    pub fn store_unavailable(required_tier: Tier, allowed: bool) -> Self {
        if allowed {
            Self::allow(AccessReason::StoreUnavailable, Some(required_tier))
        } else {
            Self {
                remaining_quota: Some(0),
                ..Self::deny(AccessReason::StoreUnavailable, Some(required_tier))
            }
        }
    }

    /// Attach the remaining quota.
    pub fn with_remaining_quota(mut self, remaining: Option<i64>) -> Self {
        self.remaining_quota = remaining;
        self
    }

    fn allow(reason: AccessReason, required_tier: Option<Tier>) -> Self {
        Self {
            has_access: true,
            reason,
            required_tier,
            remaining_quota: None,
            upgrade: None,
        }
    }

    fn deny(reason: AccessReason, required_tier: Option<Tier>) -> Self {
        Self {
            has_access: false,
            ..Self::allow(reason, required_tier)
        }
    }
}
