//! Combined tier and usage gating.

use mingus_access::AccessEvaluator;
use mingus_catalog::{MingusConfig, TierCatalog};
use mingus_core::{AccessDecision, Tier};
use mingus_error::{MingusResult, UsageErrorKind};
use mingus_usage::{CounterStore, InMemoryCounterStore, QuotaStatus, UsageTracker};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Decides feature access from both the tier and the period's usage.
///
/// The tier check runs first; usage is only consulted for features the tier
/// includes. A spent quota is reported as `quota_exceeded` and a counter
/// store outage as `store_unavailable`, so callers can tell them apart.
#[derive(Debug, Clone)]
pub struct FeatureGate {
    evaluator: AccessEvaluator,
    tracker: UsageTracker,
}

impl FeatureGate {
    /// Create a gate from its parts.
    pub fn new(evaluator: AccessEvaluator, tracker: UsageTracker) -> Self {
        Self { evaluator, tracker }
    }

    /// Create a gate over a catalog and counter store.
    pub fn with_store(catalog: Arc<TierCatalog>, store: Arc<dyn CounterStore>) -> Self {
        Self::new(
            AccessEvaluator::new(catalog.clone()),
            UsageTracker::new(catalog, store),
        )
    }

    /// Create a gate from configuration, counting in memory.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the catalog is invalid.
    pub fn from_config(config: &MingusConfig) -> MingusResult<Self> {
        let catalog = Arc::new(TierCatalog::from_config(config)?);
        Ok(Self::with_store(catalog, Arc::new(InMemoryCounterStore::new())))
    }

    /// Load layered configuration and create an in-memory gate.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if loading or validation fails.
    pub fn load() -> MingusResult<Self> {
        Self::from_config(&MingusConfig::load()?)
    }

    /// The access evaluator.
    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    /// The usage tracker.
    pub fn tracker(&self) -> &UsageTracker {
        &self.tracker
    }

    /// Decide access for the current period without recording use.
    pub async fn authorize(&self, user_id: &str, tier: Tier, feature_id: &str) -> AccessDecision {
        let period = self.tracker.current_period();
        self.decide(user_id, tier, feature_id, &period, false).await
    }

    /// Decide access for the current period and record one use when allowed.
    pub async fn consume(&self, user_id: &str, tier: Tier, feature_id: &str) -> AccessDecision {
        let period = self.tracker.current_period();
        self.decide(user_id, tier, feature_id, &period, true).await
    }

    /// [`authorize`](Self::authorize) for an unparsed tier value.
    ///
    /// A malformed tier is denied with `invalid_tier` before usage is read.
    pub async fn authorize_raw(
        &self,
        user_id: &str,
        raw_tier: &str,
        feature_id: &str,
    ) -> AccessDecision {
        match raw_tier.trim().parse::<Tier>() {
            Ok(tier) => self.authorize(user_id, tier, feature_id).await,
            Err(_) => self.evaluator.check_access_str(raw_tier, feature_id),
        }
    }

    /// Decide access for an explicit period key.
    pub async fn authorize_for_period(
        &self,
        user_id: &str,
        tier: Tier,
        feature_id: &str,
        period_key: &str,
    ) -> AccessDecision {
        self.decide(user_id, tier, feature_id, period_key, false).await
    }

    /// Decide and record for an explicit period key.
    pub async fn consume_for_period(
        &self,
        user_id: &str,
        tier: Tier,
        feature_id: &str,
        period_key: &str,
    ) -> AccessDecision {
        self.decide(user_id, tier, feature_id, period_key, true).await
    }

    #[instrument(skip(self))]
    async fn decide(
        &self,
        user_id: &str,
        tier: Tier,
        feature_id: &str,
        period_key: &str,
        record: bool,
    ) -> AccessDecision {
        let decision = self.evaluator.check_access(tier, feature_id);
        let Some(required) = decision.required_tier.filter(|_| decision.has_access) else {
            return decision;
        };

        let status = if record {
            self.tracker
                .try_consume(user_id, feature_id, period_key, tier)
                .await
        } else {
            self.tracker
                .check_quota(user_id, feature_id, period_key, tier)
                .await
        };

        let decision = match status {
            Ok(QuotaStatus::Unlimited) => decision,
            Ok(QuotaStatus::Available { remaining, .. }) => {
                decision.with_remaining_quota(Some(remaining))
            }
            Ok(QuotaStatus::Exhausted { .. }) => AccessDecision {
                upgrade: tier
                    .next()
                    .and_then(|next| self.evaluator.upgrade_offer(tier, next)),
                ..AccessDecision::quota_exceeded(required)
            },
            Ok(QuotaStatus::StoreUnavailable { allowed }) => {
                AccessDecision::store_unavailable(required, allowed)
            }
            Err(e) => match e.kind() {
                UsageErrorKind::StoreUnavailable(_) => AccessDecision::store_unavailable(
                    required,
                    self.tracker.settings().failure_policy().admits(),
                ),
                UsageErrorKind::FeatureNotFound(_) => AccessDecision::feature_not_found(),
            },
        };

        debug!(reason = %decision.reason, has_access = decision.has_access, "Access decided");
        decision
    }
}
