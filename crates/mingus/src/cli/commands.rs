//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use mingus::Tier;
use std::path::PathBuf;

/// MINGUS - subscription tier feature gating and usage limits
#[derive(Parser, Debug)]
#[command(name = "mingus")]
#[command(about = "Inspect the MINGUS tier catalog and evaluate feature access", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load configuration from this file instead of the layered defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tiers with prices and usage limits
    Tiers {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// List features, optionally only those a tier includes
    Features {
        /// Only show features available to this tier
        #[arg(long)]
        tier: Option<Tier>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Evaluate whether a tier may use a feature
    Check {
        /// Subscription tier (budget, mid_tier, professional)
        #[arg(long)]
        tier: String,

        /// Feature id
        #[arg(long)]
        feature: String,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Consume a feature repeatedly against an in-memory counter store
    Simulate {
        /// Subscription tier
        #[arg(long)]
        tier: Tier,

        /// Feature id
        #[arg(long)]
        feature: String,

        /// User id the usage is recorded for
        #[arg(long, default_value = "demo-user")]
        user: String,

        /// Number of uses to attempt
        #[arg(long, default_value = "1")]
        uses: u32,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Load and validate the catalog
    Validate,

    /// Print the effective configuration as TOML
    Config,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
