//! Catalog inspection command handlers.

use super::commands::OutputFormat;
use mingus::{JsonError, MingusConfig, MingusResult, Tier, TierCatalog};
use serde_json::json;
use std::path::Path;
use tracing::info;

/// Load configuration from `path`, or the layered defaults when absent.
pub fn load_config(path: Option<&Path>) -> MingusResult<MingusConfig> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration file");
            MingusConfig::from_file(path)
        }
        None => MingusConfig::load(),
    }
}

/// Load and validate the catalog.
pub fn load_catalog(path: Option<&Path>) -> MingusResult<TierCatalog> {
    TierCatalog::from_config(&load_config(path)?)
}

fn print_json(value: &serde_json::Value) -> MingusResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// List every tier with prices and limits.
pub fn list_tiers(catalog: &TierCatalog, format: OutputFormat) -> MingusResult<()> {
    match format {
        OutputFormat::Json => {
            let tiers: Vec<_> = catalog
                .tiers()
                .map(|t| {
                    let limits: serde_json::Map<_, _> = t
                        .limits()
                        .iter()
                        .map(|(key, limit)| (key.to_string(), json!(limit.as_raw())))
                        .collect();
                    json!({
                        "tier": t.tier(),
                        "display_name": t.display_name(),
                        "monthly_price": t.monthly_price(),
                        "yearly_price": t.yearly_price(),
                        "limits": limits,
                    })
                })
                .collect();
            print_json(&json!(tiers))
        }
        OutputFormat::Human => {
            for t in catalog.tiers() {
                let yearly = t
                    .yearly_price()
                    .map(|p| format!(", ${:.2}/year", p))
                    .unwrap_or_default();
                println!(
                    "{} ({}): ${:.2}/month{}",
                    t.display_name(),
                    t.tier(),
                    t.monthly_price(),
                    yearly
                );
                for (key, limit) in t.limits().iter() {
                    println!("  {:<40} {}", key, limit);
                }
            }
            Ok(())
        }
    }
}

/// List features, optionally restricted to one tier.
pub fn list_features(
    catalog: &TierCatalog,
    tier: Option<Tier>,
    format: OutputFormat,
) -> MingusResult<()> {
    let features = match tier {
        Some(tier) => catalog.features_for(tier),
        None => catalog.features().collect(),
    };

    match format {
        OutputFormat::Json => {
            let value = serde_json::to_value(&features).map_err(|e| JsonError::new(e.to_string()))?;
            print_json(&value)
        }
        OutputFormat::Human => {
            if let Some(tier) = tier {
                println!("Features included in {}:", tier.display_name());
            }
            println!("{:-<80}", "");
            for feature in &features {
                let limit = match (tier, feature.usage_limit_key()) {
                    (Some(tier), Some(_)) => catalog
                        .limit_for_feature(tier, feature.feature_id())
                        .map(|l| format!(" [{} per period]", l))
                        .unwrap_or_default(),
                    (None, Some(key)) => format!(" [limit: {}]", key),
                    _ => String::new(),
                };
                println!(
                    "{:<32} {:<14} {:<12}{}",
                    feature.feature_id(),
                    feature.required_tier(),
                    feature.category(),
                    limit
                );
            }
            println!("{:-<80}", "");
            println!("Total: {} features", features.len());
            Ok(())
        }
    }
}

/// Validate the catalog and print a summary.
pub fn validate_catalog(catalog: &TierCatalog) -> MingusResult<()> {
    let limited = catalog
        .features()
        .filter(|f| f.usage_limit_key().is_some())
        .count();
    println!(
        "Catalog OK: {} tiers, {} features ({} usage-limited), {} counters",
        catalog.tiers().count(),
        catalog.features().count(),
        limited,
        catalog.usage_settings().period()
    );
    Ok(())
}

/// Print the effective configuration.
pub fn show_config(path: Option<&Path>) -> MingusResult<()> {
    let config = load_config(path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
