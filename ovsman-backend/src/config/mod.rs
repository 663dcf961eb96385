//! Configuration management for the ovsman backend.
//!
//! Combines CLI argument parsing, validation, and logging initialization
//! behind one entry point used by `main`.

pub mod cli;

pub use cli::{CliCommand, CliConfig};

use anyhow::Result;
use tracing::Level;

/// Main configuration manager combining all configuration sources
#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub cli: CliConfig,
}

impl ConfigManager {
    /// Creates a new configuration manager from CLI arguments
    pub fn from_cli() -> Result<Self> {
        let cli = CliConfig::from_args()?;
        Ok(Self { cli })
    }

    /// Validates the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.cli.validate()
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> Result<()> {
        let level = if self.cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false) // Don't show the module target
            .with_level(true) // Show log level
            .compact()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
        Ok(())
    }
}
