//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the mingus binary.

mod access;
mod catalog;
mod commands;

pub use access::{check_access, simulate_usage};
pub use catalog::{list_features, list_tiers, load_catalog, show_config, validate_catalog};
pub use commands::{Cli, Commands, OutputFormat};
