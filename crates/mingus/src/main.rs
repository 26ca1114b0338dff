//! MINGUS CLI binary.
//!
//! Inspect the tier catalog, evaluate feature access and simulate
//! per-period usage limits.

use clap::Parser;
use std::sync::Arc;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, check_access, list_features, list_tiers, load_catalog, show_config,
        simulate_usage, validate_catalog,
    };

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let directive = if cli.verbose { "debug" } else { "warn" };
    mingus::init_telemetry(directive)?;

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Tiers { format } => {
            list_tiers(&load_catalog(config_path)?, format)?;
        }

        Commands::Features { tier, format } => {
            list_features(&load_catalog(config_path)?, tier, format)?;
        }

        Commands::Check {
            tier,
            feature,
            format,
        } => {
            let catalog = Arc::new(load_catalog(config_path)?);
            check_access(catalog, &tier, &feature, format)?;
        }

        Commands::Simulate {
            tier,
            feature,
            user,
            uses,
            format,
        } => {
            let catalog = Arc::new(load_catalog(config_path)?);
            simulate_usage(catalog, tier, &feature, &user, uses, format).await?;
        }

        Commands::Validate => {
            validate_catalog(&load_catalog(config_path)?)?;
        }

        Commands::Config => {
            show_config(config_path)?;
        }
    }

    Ok(())
}
