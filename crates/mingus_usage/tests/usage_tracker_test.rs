//! Tests for usage tracking against tier limits.

use async_trait::async_trait;
use mingus_catalog::TierCatalog;
use mingus_core::{StoreFailurePolicy, Tier, UsageSettings};
use mingus_usage::{
    CounterStore, InMemoryCounterStore, QuotaStatus, StoreError, StoreErrorKind, StoreResult,
    UsageErrorKind, UsageTracker,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const PERIOD: &str = "2025-01";

/// A store whose backend is always down.
struct DownStore;

#[async_trait]
impl CounterStore for DownStore {
    async fn get(&self, _key: &str) -> StoreResult<i64> {
        Err(StoreError::new(StoreErrorKind::Unavailable(
            "connection refused".to_string(),
        )))
    }

    async fn incr(&self, _key: &str) -> StoreResult<i64> {
        Err(StoreError::new(StoreErrorKind::Unavailable(
            "connection refused".to_string(),
        )))
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> StoreResult<()> {
        Err(StoreError::new(StoreErrorKind::Unavailable(
            "connection refused".to_string(),
        )))
    }
}

/// A store where another caller's increment lands between every quota read
/// and the following increment.
struct RacingStore {
    inner: InMemoryCounterStore,
    racing: AtomicBool,
}

#[async_trait]
impl CounterStore for RacingStore {
    async fn get(&self, key: &str) -> StoreResult<i64> {
        self.inner.get(key).await
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        if self.racing.swap(false, Ordering::SeqCst) {
            self.inner.incr(key).await?;
        }
        self.inner.incr(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<()> {
        self.inner.expire(key, ttl).await
    }
}

fn catalog() -> Arc<TierCatalog> {
    Arc::new(TierCatalog::bundled().unwrap())
}

fn tracker() -> (UsageTracker, Arc<InMemoryCounterStore>) {
    let store = Arc::new(InMemoryCounterStore::new());
    (UsageTracker::new(catalog(), store.clone()), store)
}

async fn fill(tracker: &UsageTracker, user: &str, feature: &str, times: usize) {
    for _ in 0..times {
        tracker.increment(user, feature, PERIOD).await.unwrap();
    }
}

#[tokio::test]
async fn test_increment_then_remaining_reflects_new_count() {
    let (tracker, _) = tracker();
    for expected in 1..=5 {
        let count = tracker
            .increment("alice", "ai_insights", PERIOD)
            .await
            .unwrap();
        assert_eq!(count, expected);

        let remaining = tracker
            .remaining("alice", "ai_insights", PERIOD, Tier::MidTier)
            .await
            .unwrap();
        assert_eq!(remaining, Some(50 - count));
    }
}

#[tokio::test]
async fn test_unlimited_remaining_is_none_regardless_of_count() {
    let (tracker, _) = tracker();
    fill(&tracker, "bob", "ai_insights", 500).await;

    let remaining = tracker
        .remaining("bob", "ai_insights", PERIOD, Tier::Professional)
        .await
        .unwrap();
    assert_eq!(remaining, None);

    // Unmetered features are unlimited for every tier
    let remaining = tracker
        .remaining("bob", "basic_analytics", PERIOD, Tier::Budget)
        .await
        .unwrap();
    assert_eq!(remaining, None);
}

#[tokio::test]
async fn test_mid_tier_at_limit_rejects_further_use() {
    let (tracker, _) = tracker();
    fill(&tracker, "carol", "ai_insights", 50).await;

    let remaining = tracker
        .remaining("carol", "ai_insights", PERIOD, Tier::MidTier)
        .await
        .unwrap();
    assert_eq!(remaining, Some(0));

    let status = tracker
        .try_consume("carol", "ai_insights", PERIOD, Tier::MidTier)
        .await
        .unwrap();
    assert_eq!(status, QuotaStatus::Exhausted { limit: 50, used: 50 });
    assert!(!status.allows_use());

    // Rejected use is not recorded
    let count = tracker.count("carol", "ai_insights", PERIOD).await.unwrap();
    assert_eq!(count, 50);
}

#[tokio::test]
async fn test_try_consume_records_until_limit() {
    let (tracker, _) = tracker();
    let mut admitted = 0;
    for _ in 0..15 {
        let status = tracker
            .try_consume("dave", "ai_insights", PERIOD, Tier::Budget)
            .await
            .unwrap();
        if status.allows_use() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 10);
    assert_eq!(tracker.count("dave", "ai_insights", PERIOD).await.unwrap(), 10);
}

#[tokio::test]
async fn test_raw_increment_may_exceed_limit() {
    let (tracker, _) = tracker();
    fill(&tracker, "erin", "health_checkins", 6).await;

    let remaining = tracker
        .remaining("erin", "health_checkins", PERIOD, Tier::Budget)
        .await
        .unwrap();
    let count = tracker.count("erin", "health_checkins", PERIOD).await.unwrap();
    assert_eq!(count, 6);
    assert_eq!(remaining, Some(4 - count));
    assert_eq!(remaining, Some(-2));

    // The policy-applied view still floors at zero
    let status = tracker
        .check_quota("erin", "health_checkins", PERIOD, Tier::Budget)
        .await
        .unwrap();
    assert_eq!(status.remaining(), Some(0));
}

#[tokio::test]
async fn test_counters_are_isolated_by_user_feature_and_period() {
    let (tracker, store) = tracker();
    fill(&tracker, "frank", "ai_insights", 3).await;

    assert_eq!(tracker.count("grace", "ai_insights", PERIOD).await.unwrap(), 0);
    assert_eq!(tracker.count("frank", "financial_reports", PERIOD).await.unwrap(), 0);
    assert_eq!(tracker.count("frank", "ai_insights", "2025-02").await.unwrap(), 0);
    assert!(store.entry("ai_insights:frank:2025-01").await.is_some());
}

#[tokio::test]
async fn test_zero_limit_is_exhausted_immediately() {
    let (tracker, _) = tracker();
    let status = tracker
        .check_quota("heidi", "data_export", PERIOD, Tier::Budget)
        .await
        .unwrap();
    assert_eq!(status, QuotaStatus::Exhausted { limit: 0, used: 0 });
}

#[tokio::test]
async fn test_unknown_feature_is_an_error() {
    let (tracker, _) = tracker();
    let err = tracker
        .increment("ivan", "crystal_ball", PERIOD)
        .await
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &UsageErrorKind::FeatureNotFound("crystal_ball".to_string())
    );
}

#[tokio::test]
async fn test_store_down_fails_closed_by_default() {
    let tracker = UsageTracker::new(catalog(), Arc::new(DownStore));

    let status = tracker
        .check_quota("judy", "ai_insights", PERIOD, Tier::Budget)
        .await
        .unwrap();
    assert_eq!(status, QuotaStatus::StoreUnavailable { allowed: false });
    assert_eq!(status.remaining(), Some(0));
    assert!(!status.allows_use());

    let status = tracker
        .try_consume("judy", "ai_insights", PERIOD, Tier::Budget)
        .await
        .unwrap();
    assert_eq!(status, QuotaStatus::StoreUnavailable { allowed: false });
}

#[tokio::test]
async fn test_store_down_fail_open_admits() {
    let tracker = UsageTracker::new(catalog(), Arc::new(DownStore)).with_settings(
        UsageSettings::default().with_failure_policy(StoreFailurePolicy::FailOpen),
    );

    let status = tracker
        .try_consume("ken", "ai_insights", PERIOD, Tier::Budget)
        .await
        .unwrap();
    assert_eq!(status, QuotaStatus::StoreUnavailable { allowed: true });
    assert!(status.allows_use());
    assert_eq!(status.remaining(), None);
}

#[tokio::test]
async fn test_store_down_surfaces_on_raw_reads() {
    let tracker = UsageTracker::new(catalog(), Arc::new(DownStore));

    let err = tracker
        .remaining("leo", "ai_insights", PERIOD, Tier::Budget)
        .await
        .unwrap_err();
    assert!(err.is_store_unavailable());

    // Unlimited needs no store
    let remaining = tracker
        .remaining("leo", "ai_insights", PERIOD, Tier::Professional)
        .await
        .unwrap();
    assert_eq!(remaining, None);
}

#[tokio::test]
async fn test_first_increment_sets_ttl() {
    let (tracker, store) = tracker();
    tracker.increment("mia", "ai_insights", PERIOD).await.unwrap();

    let entry = store.entry("ai_insights:mia:2025-01").await.unwrap();
    let ttl = entry.time_remaining().unwrap();
    assert!(ttl <= tracker.settings().counter_ttl());
    assert!(ttl > Duration::from_secs(34 * 24 * 60 * 60));
}

#[tokio::test]
async fn test_expired_counter_starts_over() {
    let store = Arc::new(InMemoryCounterStore::new());
    let tracker = UsageTracker::new(catalog(), store.clone())
        .with_settings(UsageSettings::default().with_counter_ttl_secs(Some(1)));

    fill(&tracker, "nina", "ai_insights", 3).await;
    assert_eq!(tracker.count("nina", "ai_insights", PERIOD).await.unwrap(), 3);

    tokio::time::sleep(Duration::from_millis(1_100)).await;

    assert_eq!(tracker.count("nina", "ai_insights", PERIOD).await.unwrap(), 0);
    assert_eq!(
        tracker.increment("nina", "ai_insights", PERIOD).await.unwrap(),
        1
    );
    assert_eq!(store.purge_expired().await, 0);
}

#[tokio::test]
async fn test_concurrent_increments_are_all_counted() {
    let (tracker, _) = tracker();
    let tracker = Arc::new(tracker);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let tracker = tracker.clone();
            tokio::spawn(async move {
                tracker
                    .increment("oscar", "expense_categorization", PERIOD)
                    .await
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(
        tracker
            .count("oscar", "expense_categorization", PERIOD)
            .await
            .unwrap(),
        20
    );
}

#[test]
fn test_counter_key_shape() {
    assert_eq!(
        UsageTracker::counter_key("ai_insights", "user-1", "2025-01"),
        "ai_insights:user-1:2025-01"
    );
}

#[tokio::test]
async fn test_try_consume_overshoot_is_exhausted_and_counted() {
    let store = Arc::new(RacingStore {
        inner: InMemoryCounterStore::new(),
        racing: AtomicBool::new(false),
    });
    let tracker = UsageTracker::new(catalog(), store.clone());
    fill(&tracker, "pat", "financial_reports", 1).await;

    // One use left for Budget; a concurrent caller takes it first
    store.racing.store(true, Ordering::SeqCst);
    let status = tracker
        .try_consume("pat", "financial_reports", PERIOD, Tier::Budget)
        .await
        .unwrap();

    assert_eq!(status, QuotaStatus::Exhausted { limit: 2, used: 3 });
    assert!(!status.allows_use());
    // The denied use is still in the count
    assert_eq!(
        tracker.count("pat", "financial_reports", PERIOD).await.unwrap(),
        3
    );
}

#[tokio::test]
async fn test_oversized_ttl_does_not_break_increment() {
    let settings = UsageSettings::default().with_counter_ttl_secs(Some(i64::MAX as u64));
    assert!(settings.validate().is_err());

    let store = Arc::new(InMemoryCounterStore::new());
    let tracker = UsageTracker::new(catalog(), store.clone()).with_settings(settings);

    assert_eq!(tracker.increment("quinn", "ai_insights", PERIOD).await.unwrap(), 1);
    assert_eq!(tracker.increment("quinn", "ai_insights", PERIOD).await.unwrap(), 2);
    assert!(store.entry("ai_insights:quinn:2025-01").await.is_some());
}

#[tokio::test]
async fn test_stale_period_counters_leave_the_store() {
    let store = Arc::new(InMemoryCounterStore::new());
    let tracker = UsageTracker::new(catalog(), store.clone())
        .with_settings(UsageSettings::default().with_counter_ttl_secs(Some(1)));

    for user in ["rae", "sam", "tess"] {
        fill(&tracker, user, "ai_insights", 2).await;
    }
    assert_eq!(store.len().await, 3);

    tokio::time::sleep(Duration::from_millis(1_100)).await;

    tracker.increment("rae", "ai_insights", "2025-02").await.unwrap();
    assert_eq!(store.len().await, 1);
}
