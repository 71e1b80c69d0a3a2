use crate::domain::model::EntitlementState;
use crate::domain::ports::DefaultValueStore;
use std::sync::Arc;

/// Read-only view of the entitlement flags held in the default store.
///
/// Holds the store as a trait object so only the read port is reachable from here.
#[derive(Clone)]
pub struct EntitlementStore {
    defaults: Arc<dyn DefaultValueStore>,
}

impl EntitlementStore {
    pub fn new(defaults: Arc<dyn DefaultValueStore>) -> Self {
        Self { defaults }
    }

    /// `false` when the flag is missing or not a boolean.
    pub fn is_entitled(&self, product_id: &str) -> bool {
        self.defaults.try_get::<bool>(product_id).unwrap_or(false)
    }

    pub fn state(&self, product_id: &str) -> EntitlementState {
        self.is_entitled(product_id).into()
    }
}

impl std::fmt::Debug for EntitlementStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DefaultValue;
    use std::collections::HashMap;

    struct FixedDefaults(HashMap<String, DefaultValue>);

    impl DefaultValueStore for FixedDefaults {
        fn get(&self, key: &str) -> Option<DefaultValue> {
            self.0.get(key).cloned()
        }
    }

    fn store_with(entries: &[(&str, DefaultValue)]) -> EntitlementStore {
        let map = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        EntitlementStore::new(Arc::new(FixedDefaults(map)))
    }

    #[test]
    fn test_absent_key_is_not_entitled() {
        let store = store_with(&[]);
        assert!(!store.is_entitled("com.example.pro"));
        assert_eq!(store.state("com.example.pro"), EntitlementState::NotEntitled);
    }

    #[test]
    fn test_wrong_type_is_not_entitled() {
        let store = store_with(&[
            ("com.example.int", DefaultValue::Integer(1)),
            ("com.example.text", DefaultValue::Text("true".into())),
            ("com.example.float", DefaultValue::Float(1.0)),
        ]);
        assert!(!store.is_entitled("com.example.int"));
        assert!(!store.is_entitled("com.example.text"));
        assert!(!store.is_entitled("com.example.float"));
    }

    #[test]
    fn test_stored_bool_is_returned() {
        let store = store_with(&[
            ("com.example.pro", DefaultValue::Bool(true)),
            ("com.example.lite", DefaultValue::Bool(false)),
        ]);
        assert!(store.is_entitled("com.example.pro"));
        assert_eq!(store.state("com.example.pro"), EntitlementState::Entitled);
        assert!(!store.is_entitled("com.example.lite"));
    }
}
