//! Access check and usage simulation handlers.

use super::commands::OutputFormat;
use mingus::{
    AccessDecision, AccessEvaluator, FeatureGate, InMemoryCounterStore, JsonError, MingusResult,
    Tier, TierCatalog,
};
use std::sync::Arc;
use tracing::info;

fn describe(decision: &AccessDecision) -> String {
    let mut line = format!(
        "{} ({})",
        if decision.has_access { "ALLOWED" } else { "DENIED" },
        decision.reason
    );
    if let Some(required) = decision.required_tier {
        line.push_str(&format!(", requires {}", required));
    }
    if let Some(remaining) = decision.remaining_quota {
        line.push_str(&format!(", {} remaining", remaining));
    }
    if let Some(offer) = &decision.upgrade {
        line.push_str(&format!(
            ", upgrade to {} for ${:.2}/month (+${:.2})",
            offer.target_tier, offer.target_monthly_price, offer.price_difference
        ));
    }
    line
}

/// Evaluate tier access for one feature.
pub fn check_access(
    catalog: Arc<TierCatalog>,
    tier: &str,
    feature: &str,
    format: OutputFormat,
) -> MingusResult<()> {
    let evaluator = AccessEvaluator::new(catalog);
    let decision = evaluator.check_access_str(tier, feature);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&decision)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => println!("{}: {}", feature, describe(&decision)),
    }
    Ok(())
}

/// Consume a feature `uses` times against a fresh in-memory store.
pub async fn simulate_usage(
    catalog: Arc<TierCatalog>,
    tier: Tier,
    feature: &str,
    user: &str,
    uses: u32,
    format: OutputFormat,
) -> MingusResult<()> {
    let gate = FeatureGate::with_store(catalog, Arc::new(InMemoryCounterStore::new()));
    info!(%tier, feature, user, uses, "Simulating usage");

    let mut decisions = Vec::with_capacity(uses as usize);
    for _ in 0..uses {
        decisions.push(gate.consume(user, tier, feature).await);
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&decisions)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            for (i, decision) in decisions.iter().enumerate() {
                println!("use {:>3}: {}", i + 1, describe(decision));
            }
            let allowed = decisions.iter().filter(|d| d.has_access).count();
            println!("{} of {} uses allowed", allowed, uses);
        }
    }
    Ok(())
}
