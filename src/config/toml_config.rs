use crate::domain::model::PRO_EDITION;
use crate::utils::error::{EntitlementError, Result};
use crate::utils::validation::{validate_one_of, validate_path, validate_product_id, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// How the simulated marketplace answers purchase and restore requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOutcome {
    #[default]
    Success,
    Cancelled,
    Declined,
    Offline,
    NotAllowed,
}

impl PurchaseOutcome {
    pub const NAMES: [&'static str; 5] =
        ["success", "cancelled", "declined", "offline", "not_allowed"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_catalogue")]
    pub catalogue: Vec<String>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_price")]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default)]
    pub outcome: PurchaseOutcome,
    #[serde(default)]
    pub latency_ms: u64,
    #[serde(default)]
    pub previously_purchased: Vec<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            catalogue: default_catalogue(),
            title: default_title(),
            description: String::new(),
            price: default_price(),
            currency_code: default_currency(),
            outcome: PurchaseOutcome::default(),
            latency_ms: 0,
            previously_purchased: Vec::new(),
        }
    }
}

fn default_store_path() -> String {
    "./defaults.json".to_string()
}

fn default_catalogue() -> Vec<String> {
    vec![PRO_EDITION.to_string()]
}

fn default_title() -> String {
    "CodeHub Pro".to_string()
}

fn default_price() -> f64 {
    4.99
}

fn default_currency() -> String {
    "USD".to_string()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EntitlementError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EntitlementError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EntitlementError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("store.path", &self.store.path)?;

        for id in &self.provider.catalogue {
            validate_product_id("provider.catalogue", id)?;
        }
        for id in &self.provider.previously_purchased {
            validate_product_id("provider.previously_purchased", id)?;
        }

        if !self.provider.price.is_finite() || self.provider.price < 0.0 {
            return Err(EntitlementError::InvalidConfigValueError {
                field: "provider.price".to_string(),
                value: self.provider.price.to_string(),
                reason: "Price must be a non-negative number".to_string(),
            });
        }

        if self.provider.currency_code.len() != 3
            || !self
                .provider
                .currency_code
                .chars()
                .all(|c| c.is_ascii_uppercase())
        {
            return Err(EntitlementError::InvalidConfigValueError {
                field: "provider.currency_code".to_string(),
                value: self.provider.currency_code.clone(),
                reason: "Expected a three letter ISO 4217 code".to_string(),
            });
        }

        Ok(())
    }

    pub fn store_path(&self) -> &str {
        &self.store.path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

/// Parses an outcome name the way it is spelled in the config file.
pub fn parse_outcome(name: &str) -> Result<PurchaseOutcome> {
    validate_one_of("provider.outcome", name, &PurchaseOutcome::NAMES)?;
    Ok(match name {
        "cancelled" => PurchaseOutcome::Cancelled,
        "declined" => PurchaseOutcome::Declined,
        "offline" => PurchaseOutcome::Offline,
        "not_allowed" => PurchaseOutcome::NotAllowed,
        _ => PurchaseOutcome::Success,
    })
}
