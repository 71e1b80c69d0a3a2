use serde::{Deserialize, Serialize};
use std::fmt;

/// The single purchasable unlock that currently gates every premium feature.
pub const PRO_EDITION: &str = "com.dillonbuchanan.codehub.pro";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Catalogue entry returned by a purchase provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    pub identifier: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency_code: String,
}

/// Answer to a catalogue query. An empty `products` list is a valid answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductMetadata>,
    #[serde(default)]
    pub invalid_identifiers: Vec<String>,
}

/// Closed set of values the default store can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Bool(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Integer(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Float(value)
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::Text(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Text(value.to_string())
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for bool {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
}

/// Types that can be read back out of a [`DefaultValue`]. No coercion between kinds:
/// asking for a `bool` from an `Integer` yields `None`.
pub trait Storable: sealed::Sealed + Sized {
    fn from_default(value: &DefaultValue) -> Option<Self>;
}

impl Storable for bool {
    fn from_default(value: &DefaultValue) -> Option<Self> {
        match value {
            DefaultValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Storable for i64 {
    fn from_default(value: &DefaultValue) -> Option<Self> {
        match value {
            DefaultValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl Storable for f64 {
    fn from_default(value: &DefaultValue) -> Option<Self> {
        match value {
            DefaultValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl Storable for String {
    fn from_default(value: &DefaultValue) -> Option<Self> {
        match value {
            DefaultValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntitlementState {
    NotEntitled,
    Entitled,
}

impl From<bool> for EntitlementState {
    fn from(entitled: bool) -> Self {
        if entitled {
            EntitlementState::Entitled
        } else {
            EntitlementState::NotEntitled
        }
    }
}

/// Premium capabilities that can be gated behind a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    PushNotifications,
    EnterpriseSupport,
    PrivateRepositories,
    Pro,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::PushNotifications,
        Feature::EnterpriseSupport,
        Feature::PrivateRepositories,
        Feature::Pro,
    ];

    /// Product that unlocks this feature.
    pub fn product_id(self) -> &'static str {
        match self {
            Feature::PushNotifications
            | Feature::EnterpriseSupport
            | Feature::PrivateRepositories
            | Feature::Pro => PRO_EDITION,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Feature::PushNotifications => "Push notifications",
            Feature::EnterpriseSupport => "Enterprise support",
            Feature::PrivateRepositories => "Private repositories",
            Feature::Pro => "Pro",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storable_does_not_coerce() {
        assert_eq!(bool::from_default(&DefaultValue::Bool(true)), Some(true));
        assert_eq!(bool::from_default(&DefaultValue::Integer(1)), None);
        assert_eq!(bool::from_default(&DefaultValue::Text("true".into())), None);
        assert_eq!(i64::from_default(&DefaultValue::Float(1.0)), None);
        assert_eq!(
            String::from_default(&DefaultValue::Text("x".into())),
            Some("x".to_string())
        );
    }

    #[test]
    fn test_default_value_json_shape() {
        let values: std::collections::BTreeMap<String, DefaultValue> =
            serde_json::from_str(r#"{"a": true, "b": 3, "c": 1.5, "d": "text"}"#).unwrap();
        assert_eq!(values["a"], DefaultValue::Bool(true));
        assert_eq!(values["b"], DefaultValue::Integer(3));
        assert_eq!(values["c"], DefaultValue::Float(1.5));
        assert_eq!(values["d"], DefaultValue::Text("text".into()));
    }

    #[test]
    fn test_every_feature_is_gated_by_pro_edition() {
        for feature in Feature::ALL {
            assert_eq!(feature.product_id(), PRO_EDITION);
        }
    }
}
