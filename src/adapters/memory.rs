use crate::domain::model::DefaultValue;
use crate::domain::ports::{DefaultValueSink, DefaultValueStore};
use crate::utils::error::{EntitlementError, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Process-local default store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDefaults {
    values: Arc<RwLock<HashMap<String, DefaultValue>>>,
}

impl InMemoryDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DefaultValue>,
    {
        let map = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Arc::new(RwLock::new(map)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DefaultValueStore for InMemoryDefaults {
    fn get(&self, key: &str) -> Option<DefaultValue> {
        // a poisoned lock reads as "absent"
        self.values.read().ok()?.get(key).cloned()
    }
}

impl DefaultValueSink for InMemoryDefaults {
    fn set(&self, key: &str, value: DefaultValue) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| EntitlementError::StoreError {
                message: format!("defaults lock poisoned: {}", e),
            })?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}
