pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{InMemoryDefaults, JsonFileDefaults, SimulatedStore};
pub use crate::config::TomlConfig;
pub use crate::core::{entitlement_store::EntitlementStore, features::FeaturesService};
pub use crate::domain::model::{
    DefaultValue, EntitlementState, Feature, ProductId, ProductMetadata, ProductsResponse,
    PRO_EDITION,
};
pub use crate::domain::ports::{DefaultValueSink, DefaultValueStore, PurchaseProvider};
pub use crate::utils::error::{EntitlementError, ProviderError, Result};
