//! Tests for tier-based access evaluation.

use mingus_access::AccessEvaluator;
use mingus_catalog::TierCatalog;
use mingus_core::{AccessReason, Tier};
use std::sync::Arc;
use strum::IntoEnumIterator;

fn evaluator() -> AccessEvaluator {
    AccessEvaluator::new(Arc::new(TierCatalog::bundled().unwrap()))
}

#[test]
fn test_budget_user_needs_upgrade_for_salary_negotiation() {
    let decision = evaluator().check_access(Tier::Budget, "salary_negotiation");

    assert!(!decision.has_access);
    assert_eq!(decision.reason, AccessReason::UpgradeRequired);
    assert_eq!(decision.required_tier, Some(Tier::Professional));

    let upgrade = decision.upgrade.expect("denied decision carries an upgrade offer");
    assert_eq!(upgrade.target_tier, Tier::Professional);
    assert_eq!(upgrade.target_monthly_price, 100.0);
    assert_eq!(upgrade.price_difference, 85.0);
}

#[test]
fn test_professional_user_gets_basic_analytics() {
    let decision = evaluator().check_access(Tier::Professional, "basic_analytics");

    assert!(decision.has_access);
    assert_eq!(decision.reason, AccessReason::Granted);
    assert_eq!(decision.required_tier, Some(Tier::Budget));
    assert!(decision.upgrade.is_none());
}

#[test]
fn test_budget_features_open_to_all_tiers() {
    let evaluator = evaluator();
    let budget_features: Vec<String> = evaluator
        .catalog()
        .features()
        .filter(|f| *f.required_tier() == Tier::Budget)
        .map(|f| f.feature_id().clone())
        .collect();
    assert!(!budget_features.is_empty());

    for tier in Tier::iter() {
        for feature_id in &budget_features {
            assert!(evaluator.check_access(tier, feature_id).has_access);
        }
    }
}

#[test]
fn test_access_is_monotonic_in_tier() {
    let evaluator = evaluator();
    for feature in evaluator.catalog().features() {
        for lower in Tier::iter() {
            for higher in Tier::iter().filter(|t| *t >= lower) {
                if evaluator.check_access(lower, feature.feature_id()).has_access {
                    assert!(
                        evaluator.check_access(higher, feature.feature_id()).has_access,
                        "{} lost access to {}",
                        higher,
                        feature.feature_id()
                    );
                }
            }
        }
    }
}

#[test]
fn test_check_access_is_deterministic() {
    let evaluator = evaluator();
    for tier in Tier::iter() {
        for feature in ["ai_insights", "data_export", "priority_support", "nope"] {
            assert_eq!(
                evaluator.check_access(tier, feature),
                evaluator.check_access(tier, feature)
            );
        }
    }
}

#[test]
fn test_unknown_feature() {
    let decision = evaluator().check_access(Tier::Professional, "crystal_ball");
    assert!(!decision.has_access);
    assert_eq!(decision.reason, AccessReason::FeatureNotFound);
    assert_eq!(decision.required_tier, None);
}

#[test]
fn test_malformed_tier_is_a_decision() {
    let evaluator = evaluator();

    let decision = evaluator.check_access_str("platinum", "basic_analytics");
    assert!(!decision.has_access);
    assert_eq!(decision.reason, AccessReason::InvalidTier);
    assert_eq!(decision.required_tier, Some(Tier::Budget));

    let decision = evaluator.check_access_str(" Mid-Tier ", "career_risk_assessment");
    assert!(decision.has_access);

    let decision = evaluator.check_access_str("platinum", "crystal_ball");
    assert_eq!(decision.reason, AccessReason::FeatureNotFound);
}

#[test]
fn test_mid_tier_upgrade_offer_to_professional() {
    let decision = evaluator().check_access(Tier::MidTier, "tax_optimization");
    let upgrade = decision.upgrade.unwrap();
    assert_eq!(upgrade.price_difference, 65.0);
}

#[test]
fn test_locked_and_accessible_partition_catalog() {
    let evaluator = evaluator();
    let total = evaluator.catalog().features().count();
    for tier in Tier::iter() {
        let open = evaluator.accessible_features(tier);
        let locked = evaluator.locked_features(tier);
        assert_eq!(open.len() + locked.len(), total);
        assert!(locked.iter().all(|f| !open.contains(f)));
    }
    assert!(evaluator.locked_features(Tier::Professional).is_empty());
}

#[test]
fn test_no_upgrade_offer_downwards() {
    let evaluator = evaluator();
    assert!(evaluator.upgrade_offer(Tier::Professional, Tier::Budget).is_none());
    assert!(evaluator.upgrade_offer(Tier::MidTier, Tier::MidTier).is_none());
    assert!(evaluator.upgrade_offer(Tier::Budget, Tier::MidTier).is_some());
}
