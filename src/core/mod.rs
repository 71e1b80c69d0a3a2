pub mod entitlement_store;
pub mod features;

pub use crate::domain::model::{EntitlementState, Feature, ProductMetadata, PRO_EDITION};
pub use crate::domain::ports::{DefaultValueSink, DefaultValueStore, PurchaseProvider};
pub use crate::utils::error::Result;
