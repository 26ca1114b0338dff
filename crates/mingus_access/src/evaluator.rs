//! Access evaluation over the tier catalog.

use mingus_catalog::TierCatalog;
use mingus_core::{AccessDecision, FeatureDefinition, Tier, UpgradeOffer};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Evaluates tier access to features.
///
/// # Example
///
/// ```
/// use mingus_access::AccessEvaluator;
/// use mingus_catalog::TierCatalog;
/// use mingus_core::{AccessReason, Tier};
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let evaluator = AccessEvaluator::new(Arc::new(TierCatalog::bundled()?));
///
/// let decision = evaluator.check_access(Tier::Budget, "salary_negotiation");
/// assert!(!decision.has_access);
/// assert_eq!(decision.reason, AccessReason::UpgradeRequired);
/// assert_eq!(decision.required_tier, Some(Tier::Professional));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    catalog: Arc<TierCatalog>,
}

impl AccessEvaluator {
    /// Create an evaluator over a loaded catalog.
    pub fn new(catalog: Arc<TierCatalog>) -> Self {
        Self { catalog }
    }

    /// The catalog this evaluator reads.
    pub fn catalog(&self) -> &TierCatalog {
        &self.catalog
    }

    /// Decide whether `user_tier` may use `feature_id`.
    ///
    /// Unknown features are denied with `feature_not_found`. Denials for an
    /// insufficient tier carry an upgrade offer to the required tier.
    #[instrument(skip(self))]
    pub fn check_access(&self, user_tier: Tier, feature_id: &str) -> AccessDecision {
        let Some(feature) = self.catalog.feature(feature_id) else {
            debug!("Feature not in catalog");
            return AccessDecision::feature_not_found();
        };

        let required = *feature.required_tier();
        if user_tier.satisfies(required) {
            debug!(%required, "Access granted");
            AccessDecision::granted(required)
        } else {
            debug!(%required, "Upgrade required");
            AccessDecision::upgrade_required(required, self.upgrade_offer(user_tier, required))
        }
    }

    /// Like [`check_access`](Self::check_access), for an unparsed tier value.
    ///
    /// A malformed tier yields an `invalid_tier` decision, never an error.
    /// The feature is resolved first, so an unknown feature is reported as
    /// `feature_not_found` whatever the tier value.
    #[instrument(skip(self))]
    pub fn check_access_str(&self, raw_tier: &str, feature_id: &str) -> AccessDecision {
        let Some(feature) = self.catalog.feature(feature_id) else {
            debug!("Feature not in catalog");
            return AccessDecision::feature_not_found();
        };

        match raw_tier.trim().parse::<Tier>() {
            Ok(tier) => self.check_access(tier, feature_id),
            Err(_) => {
                debug!("Tier value is malformed");
                AccessDecision::invalid_tier(Some(*feature.required_tier()))
            }
        }
    }

    /// Features a tier may use, ordered by id.
    pub fn accessible_features(&self, tier: Tier) -> Vec<&FeatureDefinition> {
        self.catalog.features_for(tier)
    }

    /// Features gated above a tier, ordered by id.
    pub fn locked_features(&self, tier: Tier) -> Vec<&FeatureDefinition> {
        self.catalog
            .features()
            .filter(|f| !f.is_available_to(tier))
            .collect()
    }

    /// Price delta for moving from `current` up to `target`.
    ///
    /// `None` unless `target` ranks above `current`.
    pub fn upgrade_offer(&self, current: Tier, target: Tier) -> Option<UpgradeOffer> {
        if target <= current {
            return None;
        }
        let target_price = self.catalog.price(target);
        Some(UpgradeOffer {
            target_tier: target,
            target_monthly_price: target_price,
            price_difference: target_price - self.catalog.price(current),
        })
    }
}
