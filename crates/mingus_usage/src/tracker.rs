//! Usage counting against tier limits.

use crate::{CounterStore, QuotaStatus};
use mingus_catalog::TierCatalog;
use mingus_core::{FeatureDefinition, Tier, UsageLimit, UsageSettings};
use mingus_error::{UsageError, UsageErrorKind, UsageResult};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Tracks feature usage per user and period.
///
/// Counters are keyed `{feature_id}:{user_id}:{period_key}`. A new period key
/// starts from zero, and each counter gets a TTL when created so old periods
/// age out of the store.
///
/// Store failures on the quota path follow the configured
/// [`StoreFailurePolicy`](mingus_core::StoreFailurePolicy) and are always
/// reported as [`QuotaStatus::StoreUnavailable`], never as exhaustion.
#[derive(Clone)]
pub struct UsageTracker {
    catalog: Arc<TierCatalog>,
    store: Arc<dyn CounterStore>,
    settings: UsageSettings,
}

impl std::fmt::Debug for UsageTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageTracker")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl UsageTracker {
    /// Create a tracker using the catalog's `[usage]` settings.
    pub fn new(catalog: Arc<TierCatalog>, store: Arc<dyn CounterStore>) -> Self {
        let settings = catalog.usage_settings().clone();
        Self {
            catalog,
            store,
            settings,
        }
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: UsageSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Active settings.
    pub fn settings(&self) -> &UsageSettings {
        &self.settings
    }

    /// Store key for a counter.
    pub fn counter_key(feature_id: &str, user_id: &str, period_key: &str) -> String {
        format!("{}:{}:{}", feature_id, user_id, period_key)
    }

    /// Period key for the current time under the configured period.
    pub fn current_period(&self) -> String {
        self.settings.period().current_key()
    }

    fn feature(&self, feature_id: &str) -> UsageResult<&FeatureDefinition> {
        self.catalog
            .feature(feature_id)
            .ok_or_else(|| UsageError::new(UsageErrorKind::FeatureNotFound(feature_id.to_string())))
    }

    fn limit(&self, feature: &FeatureDefinition, tier: Tier) -> UsageLimit {
        feature
            .usage_limit_key()
            .and_then(|key| self.catalog.limit(tier, key))
            .unwrap_or(UsageLimit::Unlimited)
    }

    /// Record one use and return the new count.
    ///
    /// Always records, even past the limit; use [`try_consume`](Self::try_consume)
    /// to enforce limits. No deduplication happens here.
    ///
    /// # Errors
    ///
    /// `FeatureNotFound` for an unknown feature, `StoreUnavailable` when the
    /// increment fails.
    #[instrument(skip(self))]
    pub async fn increment(
        &self,
        user_id: &str,
        feature_id: &str,
        period_key: &str,
    ) -> UsageResult<i64> {
        self.feature(feature_id)?;
        let key = Self::counter_key(feature_id, user_id, period_key);
        let count = self.store.incr(&key).await?;

        if count == 1 {
            // The increment already happened; report it even if the TTL is lost.
            if let Err(e) = self.store.expire(&key, self.settings.counter_ttl()).await {
                warn!(error = %e, key, "Failed to set counter TTL");
            }
        }

        debug!(count, "Recorded usage");
        Ok(count)
    }

    /// Uses recorded for the period.
    ///
    /// # Errors
    ///
    /// `FeatureNotFound` for an unknown feature, `StoreUnavailable` when the
    /// read fails.
    pub async fn count(&self, user_id: &str, feature_id: &str, period_key: &str) -> UsageResult<i64> {
        self.feature(feature_id)?;
        let key = Self::counter_key(feature_id, user_id, period_key);
        Ok(self.store.get(&key).await?)
    }

    /// Uses left for the period: `limit - count`, or `None` when the tier's
    /// limit for the feature is unlimited.
    ///
    /// Raw [`increment`](Self::increment) can record past the cap, in which
    /// case the result is negative. The unlimited case never touches the store.
    ///
    /// # Errors
    ///
    /// `FeatureNotFound` for an unknown feature, `StoreUnavailable` when the
    /// read fails. Use [`check_quota`](Self::check_quota) for the
    /// policy-applied view.
    #[instrument(skip(self))]
    pub async fn remaining(
        &self,
        user_id: &str,
        feature_id: &str,
        period_key: &str,
        tier: Tier,
    ) -> UsageResult<Option<i64>> {
        let feature = self.feature(feature_id)?;
        let limit = self.limit(feature, tier);
        if limit.is_unlimited() {
            return Ok(None);
        }

        let key = Self::counter_key(feature_id, user_id, period_key);
        let used = self.store.get(&key).await?;
        Ok(limit.balance(used))
    }

    /// Compare usage against the tier's limit, applying the failure policy.
    ///
    /// # Errors
    ///
    /// `FeatureNotFound` for an unknown feature. Store failures are folded
    /// into [`QuotaStatus::StoreUnavailable`].
    #[instrument(skip(self))]
    pub async fn check_quota(
        &self,
        user_id: &str,
        feature_id: &str,
        period_key: &str,
        tier: Tier,
    ) -> UsageResult<QuotaStatus> {
        let feature = self.feature(feature_id)?;
        let limit = match self.limit(feature, tier) {
            UsageLimit::Unlimited => return Ok(QuotaStatus::Unlimited),
            limited => limited.as_raw(),
        };

        let key = Self::counter_key(feature_id, user_id, period_key);
        let status = match self.store.get(&key).await {
            Ok(used) if used >= limit => QuotaStatus::Exhausted { limit, used },
            Ok(used) => QuotaStatus::Available {
                limit,
                used,
                remaining: limit - used,
            },
            Err(e) => self.store_failure(&e.to_string()),
        };

        debug!(?status, "Quota checked");
        Ok(status)
    }

    /// Record one use if the quota allows it.
    ///
    /// At the limit the use is rejected and nothing is recorded. The check and
    /// the increment are separate store calls, so concurrent callers can
    /// overshoot by at most the number in flight. An increment that lands past
    /// the cap is reported as `Exhausted`, but the denied use has already been
    /// recorded and stays in the count. Unlimited use is still counted, best
    /// effort.
    ///
    /// # Errors
    ///
    /// `FeatureNotFound` for an unknown feature.
    #[instrument(skip(self))]
    pub async fn try_consume(
        &self,
        user_id: &str,
        feature_id: &str,
        period_key: &str,
        tier: Tier,
    ) -> UsageResult<QuotaStatus> {
        let status = self.check_quota(user_id, feature_id, period_key, tier).await?;

        match status {
            QuotaStatus::Unlimited => {
                if let Err(e) = self.increment(user_id, feature_id, period_key).await {
                    warn!(error = %e, "Could not count unlimited use");
                }
                Ok(QuotaStatus::Unlimited)
            }
            QuotaStatus::Available { limit, .. } => {
                match self.increment(user_id, feature_id, period_key).await {
                    Ok(used) if used > limit => Ok(QuotaStatus::Exhausted { limit, used }),
                    Ok(used) => Ok(QuotaStatus::Available {
                        limit,
                        used,
                        remaining: limit - used,
                    }),
                    Err(e) if e.is_store_unavailable() => Ok(self.store_failure(&e.to_string())),
                    Err(e) => Err(e),
                }
            }
            QuotaStatus::Exhausted { .. } | QuotaStatus::StoreUnavailable { .. } => Ok(status),
        }
    }

    fn store_failure(&self, error: &str) -> QuotaStatus {
        let allowed = self.settings.failure_policy().admits();
        warn!(
            error,
            policy = %self.settings.failure_policy(),
            allowed,
            "Counter store unavailable"
        );
        QuotaStatus::StoreUnavailable { allowed }
    }
}
