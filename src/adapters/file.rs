use crate::domain::model::DefaultValue;
use crate::domain::ports::{DefaultValueSink, DefaultValueStore};
use crate::utils::error::{EntitlementError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

/// Default store persisted as a flat JSON object. Every `set` rewrites the file.
///
/// Entries are kept as raw JSON so values written by other tools (`null`, arrays,
/// objects) survive a rewrite; they read back as absent.
#[derive(Debug, Clone)]
pub struct JsonFileDefaults {
    path: PathBuf,
    values: Arc<RwLock<BTreeMap<String, Value>>>,
    // serialises writers; readers only wait for the final swap
    writer: Arc<Mutex<()>>,
}

impl JsonFileDefaults {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened defaults at {} ({} keys)", path.display(), values.len());

        Ok(Self {
            path,
            values: Arc::new(RwLock::new(values)),
            writer: Arc::new(Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(values)?;
        // write-then-rename
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> EntitlementError {
    EntitlementError::StoreError {
        message: format!("defaults lock poisoned: {}", e),
    }
}

impl DefaultValueStore for JsonFileDefaults {
    fn get(&self, key: &str) -> Option<DefaultValue> {
        let raw = self.values.read().ok()?.get(key).cloned()?;
        serde_json::from_value(raw).ok()
    }
}

impl DefaultValueSink for JsonFileDefaults {
    /// The new value becomes visible only once it is on disk.
    fn set(&self, key: &str, value: DefaultValue) -> Result<()> {
        let _writer = self.writer.lock().map_err(poisoned)?;

        let mut next = self.values.read().map_err(poisoned)?.clone();
        next.insert(key.to_string(), serde_json::to_value(value)?);
        self.persist(&next)?;

        *self.values.write().map_err(poisoned)? = next;
        tracing::debug!("Stored '{}' in {}", key, self.path.display());
        Ok(())
    }
}
