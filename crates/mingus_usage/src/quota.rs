//! Quota check outcomes.

/// Where a user stands against a feature's usage limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaStatus {
    /// The tier has no cap for the feature
    Unlimited,
    /// Uses remain this period
    Available {
        /// Cap for the period
        limit: i64,
        /// Uses recorded so far
        used: i64,
        /// Uses left
        remaining: i64,
    },
    /// The period's cap is spent
    Exhausted {
        /// Cap for the period
        limit: i64,
        /// Uses recorded so far
        used: i64,
    },
    /// The counter store failed; `allowed` is the failure policy's verdict
    StoreUnavailable {
        /// Whether use is admitted anyway
        allowed: bool,
    },
}

impl QuotaStatus {
    /// Whether the feature may be used.
    pub fn allows_use(&self) -> bool {
        match self {
            QuotaStatus::Unlimited | QuotaStatus::Available { .. } => true,
            QuotaStatus::Exhausted { .. } => false,
            QuotaStatus::StoreUnavailable { allowed } => *allowed,
        }
    }

    /// Uses left, `None` when uncapped or unknown.
    ///
    /// A fail-closed store outage reports zero so callers treat it as
    /// "limit reached".
    pub fn remaining(&self) -> Option<i64> {
        match self {
            QuotaStatus::Unlimited => None,
            QuotaStatus::Available { remaining, .. } => Some(*remaining),
            QuotaStatus::Exhausted { .. } => Some(0),
            QuotaStatus::StoreUnavailable { allowed: true } => None,
            QuotaStatus::StoreUnavailable { allowed: false } => Some(0),
        }
    }
}
