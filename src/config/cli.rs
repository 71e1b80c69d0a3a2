use crate::config::toml_config::{parse_outcome, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "entitlements")]
#[command(about = "Inspect, purchase and restore premium feature entitlements")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the defaults file location
    #[arg(long)]
    pub store: Option<String>,

    /// Override the simulated store outcome (success, cancelled, declined, offline, not_allowed)
    #[arg(long)]
    pub outcome: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show which premium features are unlocked
    Status,
    /// Purchase the pro edition
    Activate,
    /// Restore previous purchases
    Restore,
}

impl CliConfig {
    /// Loads the TOML file (if any) and applies command line overrides on top.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(store) = &self.store {
            config.store.path = store.clone();
            tracing::debug!("Store path overridden to {}", store);
        }
        if let Some(outcome) = &self.outcome {
            config.provider.outcome = parse_outcome(outcome)?;
            tracing::debug!("Simulated outcome overridden to {}", outcome);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("--config", path)?;
        }
        if let Some(store) = &self.store {
            validate_path("--store", store)?;
        }
        if let Some(outcome) = &self.outcome {
            parse_outcome(outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::PurchaseOutcome;

    #[test]
    fn test_parse_subcommand_and_overrides() {
        let cli = CliConfig::parse_from([
            "entitlements",
            "--store",
            "/tmp/d.json",
            "--outcome",
            "cancelled",
            "activate",
        ]);
        assert_eq!(cli.command, Command::Activate);
        assert!(cli.validate().is_ok());

        let config = cli.resolve().unwrap();
        assert_eq!(config.store_path(), "/tmp/d.json");
        assert_eq!(config.provider.outcome, PurchaseOutcome::Cancelled);
    }

    #[test]
    fn test_invalid_outcome_fails_validation() {
        let cli = CliConfig::parse_from(["entitlements", "--outcome", "maybe", "status"]);
        assert!(cli.validate().is_err());
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(CliConfig::try_parse_from(["entitlements"]).is_err());
    }
}
