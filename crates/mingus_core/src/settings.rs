//! Usage tracking settings.

use crate::UsagePeriod;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do when the counter store cannot be reached.
///
/// Usage limits gate paid features, so the default treats an unreachable
/// store as "limit reached".
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
pub enum StoreFailurePolicy {
    /// Deny metered use and report zero remaining
    #[default]
    FailClosed,
    /// Allow metered use without recording it
    FailOpen,
}

impl StoreFailurePolicy {
    /// Whether use is admitted while the store is down.
    pub fn admits(&self) -> bool {
        matches!(self, StoreFailurePolicy::FailOpen)
    }
}

/// Longest accepted counter TTL, ten years.
pub const MAX_COUNTER_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Settings for the usage tracker, read from the `[usage]` table.
///
/// # Examples
///
/// ```
/// use mingus_core::{StoreFailurePolicy, UsagePeriod, UsageSettings};
///
/// let settings = UsageSettings::default().with_failure_policy(StoreFailurePolicy::FailOpen);
/// assert_eq!(*settings.period(), UsagePeriod::Monthly);
/// assert!(settings.failure_policy().admits());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
#[serde(deny_unknown_fields)]
pub struct UsageSettings {
    /// Window each counter covers
    #[serde(default)]
    period: UsagePeriod,

    /// Behaviour when the counter store fails
    #[serde(default)]
    failure_policy: StoreFailurePolicy,

    /// Counter TTL in seconds; the period default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    counter_ttl_secs: Option<u64>,
}

impl Default for UsageSettings {
    fn default() -> Self {
        Self {
            period: UsagePeriod::default(),
            failure_policy: StoreFailurePolicy::default(),
            counter_ttl_secs: None,
        }
    }
}

impl UsageSettings {
    /// TTL applied to a counter when it is created.
    pub fn counter_ttl(&self) -> Duration {
        self.counter_ttl_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.period.default_ttl())
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TTL is zero or longer than
    /// [`MAX_COUNTER_TTL_SECS`].
    pub fn validate(&self) -> Result<(), String> {
        match self.counter_ttl_secs {
            Some(0) => Err("counter_ttl_secs must be greater than zero".to_string()),
            Some(secs) if secs > MAX_COUNTER_TTL_SECS => Err(format!(
                "counter_ttl_secs must be at most {} (ten years), got {}",
                MAX_COUNTER_TTL_SECS, secs
            )),
            _ => Ok(()),
        }
    }
}
