//! Usage periods and their counter keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The window a usage counter covers.
///
/// Counters are keyed by period so a new window starts from zero without any
/// cleanup; stale keys are simply never read again.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use mingus_core::UsagePeriod;
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 17, 8, 30, 0).unwrap();
/// assert_eq!(UsagePeriod::Monthly.key_for(at), "2025-01");
/// assert_eq!(UsagePeriod::Daily.key_for(at), "2025-01-17");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UsagePeriod {
    /// Calendar month, key `YYYY-MM`
    #[default]
    Monthly,
    /// Calendar day, key `YYYY-MM-DD`
    Daily,
}

impl UsagePeriod {
    /// Period key for the given instant.
    pub fn key_for(&self, at: DateTime<Utc>) -> String {
        match self {
            UsagePeriod::Monthly => at.format("%Y-%m").to_string(),
            UsagePeriod::Daily => at.format("%Y-%m-%d").to_string(),
        }
    }

    /// Period key for now.
    pub fn current_key(&self) -> String {
        self.key_for(Utc::now())
    }

    /// How long a counter should outlive its period start.
    pub fn default_ttl(&self) -> Duration {
        const DAY: u64 = 24 * 60 * 60;
        match self {
            UsagePeriod::Monthly => Duration::from_secs(35 * DAY),
            UsagePeriod::Daily => Duration::from_secs(2 * DAY),
        }
    }
}
