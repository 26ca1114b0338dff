//! Per-tier usage limits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw sentinel for an unlimited usage limit.
pub const UNLIMITED: i64 = -1;

/// A per-period cap on feature usage.
///
/// Configuration writes limits as integers with `-1` meaning unlimited; any
/// other negative value is rejected.
///
/// # Examples
///
/// ```
/// use mingus_core::UsageLimit;
///
/// let limit = UsageLimit::try_from(50).unwrap();
/// assert_eq!(limit.remaining(20), Some(30));
/// assert_eq!(UsageLimit::Unlimited.remaining(1_000), None);
/// assert!(UsageLimit::try_from(-2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum UsageLimit {
    /// At most this many uses per period
    Limited(u64),
    /// No cap
    Unlimited,
}

impl UsageLimit {
    /// Whether this limit is uncapped.
    pub fn is_unlimited(&self) -> bool {
        matches!(self, UsageLimit::Unlimited)
    }

    /// The raw integer form, `-1` for unlimited.
    pub fn as_raw(&self) -> i64 {
        match self {
            UsageLimit::Limited(n) => i64::try_from(*n).unwrap_or(i64::MAX),
            UsageLimit::Unlimited => UNLIMITED,
        }
    }

    /// `limit - used`, negative once usage has run past the cap; `None` when
    /// unlimited.
    pub fn balance(&self, used: i64) -> Option<i64> {
        match self {
            UsageLimit::Limited(_) => Some(self.as_raw().saturating_sub(used)),
            UsageLimit::Unlimited => None,
        }
    }

    /// Uses left after `used`, clamped at zero; `None` when unlimited.
    pub fn remaining(&self, used: i64) -> Option<i64> {
        match self {
            UsageLimit::Limited(_) => Some((self.as_raw() - used.max(0)).max(0)),
            UsageLimit::Unlimited => None,
        }
    }

    /// Whether `used` has reached the cap.
    pub fn is_reached(&self, used: i64) -> bool {
        self.remaining(used) == Some(0)
    }
}

impl TryFrom<i64> for UsageLimit {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            UNLIMITED => Ok(UsageLimit::Unlimited),
            n if n >= 0 => Ok(UsageLimit::Limited(n as u64)),
            n => Err(format!(
                "usage limit must be -1 (unlimited) or non-negative, got {}",
                n
            )),
        }
    }
}

impl From<UsageLimit> for i64 {
    fn from(limit: UsageLimit) -> Self {
        limit.as_raw()
    }
}

impl fmt::Display for UsageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageLimit::Limited(n) => write!(f, "{}", n),
            UsageLimit::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Usage limits for one tier, keyed by limit name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(transparent)]
pub struct TierLimits(BTreeMap<String, UsageLimit>);

impl TierLimits {
    /// Look up a limit by key.
    pub fn get(&self, key: &str) -> Option<UsageLimit> {
        self.0.get(key).copied()
    }

    /// Whether the key is defined for this tier.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate limits in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, UsageLimit)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of defined limits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no limits are defined.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_clamps_at_zero() {
        let limit = UsageLimit::Limited(5);
        assert_eq!(limit.remaining(7), Some(0));
        assert!(limit.is_reached(5));
        assert!(!limit.is_reached(4));
    }

    #[test]
    fn balance_goes_negative_past_the_cap() {
        let limit = UsageLimit::Limited(4);
        assert_eq!(limit.balance(1), Some(3));
        assert_eq!(limit.balance(6), Some(-2));
        assert_eq!(UsageLimit::Unlimited.balance(6), None);
    }

    #[test]
    fn unlimited_is_never_reached() {
        assert!(!UsageLimit::Unlimited.is_reached(i64::MAX));
        assert_eq!(UsageLimit::Unlimited.as_raw(), UNLIMITED);
    }

    #[test]
    fn deserializes_from_integer_form() {
        let limits: TierLimits =
            serde_json::from_str(r#"{"ai_insights_per_month": 50, "reports_per_month": -1}"#)
                .unwrap();
        assert_eq!(limits.get("ai_insights_per_month"), Some(UsageLimit::Limited(50)));
        assert_eq!(limits.get("reports_per_month"), Some(UsageLimit::Unlimited));
        assert!(serde_json::from_str::<TierLimits>(r#"{"x": -3}"#).is_err());
    }
}
