use crate::config::toml_config::{ProviderSettings, PurchaseOutcome};
use crate::domain::model::{DefaultValue, ProductMetadata, ProductsResponse};
use crate::domain::ports::{DefaultValueSink, PurchaseProvider};
use crate::utils::error::ProviderError;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Marketplace stand-in driven by configuration.
///
/// Successful purchases and restores write `true` under the product identifier
/// and an RFC 3339 timestamp under `<id>.purchased_at` into the sink.
pub struct SimulatedStore {
    settings: ProviderSettings,
    sink: Arc<dyn DefaultValueSink>,
    owned: Mutex<BTreeSet<String>>,
}

impl SimulatedStore {
    pub fn new(settings: ProviderSettings, sink: Arc<dyn DefaultValueSink>) -> Self {
        let owned = settings.previously_purchased.iter().cloned().collect();
        Self {
            settings,
            sink,
            owned: Mutex::new(owned),
        }
    }

    pub fn purchased_at_key(product_id: &str) -> String {
        format!("{}.purchased_at", product_id)
    }

    async fn simulate_latency(&self) {
        if self.settings.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.settings.latency_ms)).await;
        }
    }

    fn product(&self, product_id: &str) -> ProductMetadata {
        ProductMetadata {
            identifier: product_id.into(),
            title: self.settings.title.clone(),
            description: self.settings.description.clone(),
            price: self.settings.price,
            currency_code: self.settings.currency_code.clone(),
        }
    }

    fn unlock(&self, product_id: &str) -> Result<(), ProviderError> {
        let stamp = chrono::Utc::now().to_rfc3339();
        // timestamp first: the flag is the last thing written
        self.sink
            .set(&Self::purchased_at_key(product_id), DefaultValue::Text(stamp))
            .and_then(|_| self.sink.set(product_id, DefaultValue::Bool(true)))
            .map_err(|e| ProviderError::Other {
                message: format!("failed to record purchase: {}", e),
            })?;
        tracing::info!("🔓 Unlocked {}", product_id);
        Ok(())
    }

    fn owned(&self) -> Vec<String> {
        self.owned
            .lock()
            .map(|owned| owned.iter().cloned().collect())
            .unwrap_or_default()
    }
}

fn outcome_error(outcome: PurchaseOutcome) -> Option<ProviderError> {
    match outcome {
        PurchaseOutcome::Success => None,
        PurchaseOutcome::Cancelled => Some(ProviderError::Cancelled),
        PurchaseOutcome::Declined => Some(ProviderError::PaymentDeclined {
            reason: "payment method declined".to_string(),
        }),
        PurchaseOutcome::Offline => Some(offline()),
        PurchaseOutcome::NotAllowed => Some(ProviderError::NotAllowed),
    }
}

fn restore_error(outcome: PurchaseOutcome) -> Option<ProviderError> {
    match outcome {
        // restores are never charged
        PurchaseOutcome::Declined => None,
        other => outcome_error(other),
    }
}

fn offline() -> ProviderError {
    ProviderError::Network {
        message: "the store could not be reached".to_string(),
    }
}

#[async_trait]
impl PurchaseProvider for SimulatedStore {
    async fn request_product_data(
        &self,
        product_id: &str,
    ) -> Result<ProductsResponse, ProviderError> {
        self.simulate_latency().await;
        if self.settings.outcome == PurchaseOutcome::Offline {
            return Err(offline());
        }

        if self.settings.catalogue.iter().any(|id| id == product_id) {
            Ok(ProductsResponse {
                products: vec![self.product(product_id)],
                invalid_identifiers: vec![],
            })
        } else {
            tracing::debug!("{} is not in the simulated catalogue", product_id);
            Ok(ProductsResponse {
                products: vec![],
                invalid_identifiers: vec![product_id.to_string()],
            })
        }
    }

    async fn purchase_product(&self, product: &ProductMetadata) -> Result<(), ProviderError> {
        self.simulate_latency().await;
        if let Some(err) = outcome_error(self.settings.outcome) {
            tracing::debug!("Simulated purchase of {} failed: {}", product.identifier, err);
            return Err(err);
        }

        self.unlock(product.identifier.as_str())?;
        if let Ok(mut owned) = self.owned.lock() {
            owned.insert(product.identifier.to_string());
        }
        Ok(())
    }

    async fn restore(&self) -> Result<(), ProviderError> {
        self.simulate_latency().await;
        if let Some(err) = restore_error(self.settings.outcome) {
            return Err(err);
        }

        let owned = self.owned();
        if owned.is_empty() {
            tracing::info!("No previous purchases to restore");
        }
        for product_id in owned {
            self.unlock(&product_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file::JsonFileDefaults;
    use crate::adapters::memory::InMemoryDefaults;
    use crate::core::entitlement_store::EntitlementStore;
    use crate::domain::model::PRO_EDITION;
    use crate::domain::ports::DefaultValueStore;

    fn settings(outcome: PurchaseOutcome) -> ProviderSettings {
        ProviderSettings {
            catalogue: vec![PRO_EDITION.to_string()],
            outcome,
            ..ProviderSettings::default()
        }
    }

    #[tokio::test]
    async fn test_catalogue_lookup() {
        let defaults = InMemoryDefaults::new();
        let store = SimulatedStore::new(settings(PurchaseOutcome::Success), Arc::new(defaults));

        let found = store.request_product_data(PRO_EDITION).await.unwrap();
        assert_eq!(found.products.len(), 1);
        assert_eq!(found.products[0].identifier.as_str(), PRO_EDITION);

        let missing = store.request_product_data("com.example.none").await.unwrap();
        assert!(missing.products.is_empty());
        assert_eq!(missing.invalid_identifiers, vec!["com.example.none"]);
    }

    #[tokio::test]
    async fn test_successful_purchase_writes_flag_and_timestamp() {
        let defaults = InMemoryDefaults::new();
        let store = SimulatedStore::new(
            settings(PurchaseOutcome::Success),
            Arc::new(defaults.clone()),
        );
        let product = store.product(PRO_EDITION);

        store.purchase_product(&product).await.unwrap();

        assert_eq!(defaults.get(PRO_EDITION), Some(DefaultValue::Bool(true)));
        let stamp = match defaults.get(&SimulatedStore::purchased_at_key(PRO_EDITION)) {
            Some(DefaultValue::Text(s)) => s,
            other => panic!("unexpected timestamp value: {other:?}"),
        };
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[tokio::test]
    async fn test_failed_purchase_leaves_store_untouched() {
        let defaults = InMemoryDefaults::new();
        let store = SimulatedStore::new(
            settings(PurchaseOutcome::Declined),
            Arc::new(defaults.clone()),
        );
        let product = store.product(PRO_EDITION);

        let err = store.purchase_product(&product).await.unwrap_err();
        assert!(matches!(err, ProviderError::PaymentDeclined { .. }));
        assert!(defaults.is_empty());
    }

    #[tokio::test]
    async fn test_purchase_with_unwritable_store_stays_locked() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let defaults = Arc::new(JsonFileDefaults::open(blocker.join("defaults.json")).unwrap());
        let store = SimulatedStore::new(settings(PurchaseOutcome::Success), defaults.clone());
        let product = store.product(PRO_EDITION);

        let err = store.purchase_product(&product).await.unwrap_err();
        assert!(matches!(err, ProviderError::Other { .. }));
        assert_eq!(defaults.get(PRO_EDITION), None);
        assert!(!EntitlementStore::new(defaults).is_entitled(PRO_EDITION));
    }

    /// Accepts everything except the entitlement flag itself.
    struct RejectsFlag(InMemoryDefaults);

    impl DefaultValueSink for RejectsFlag {
        fn set(&self, key: &str, value: DefaultValue) -> crate::utils::error::Result<()> {
            if key == PRO_EDITION {
                return Err(crate::utils::error::EntitlementError::StoreError {
                    message: "read-only key".to_string(),
                });
            }
            self.0.set(key, value)
        }
    }

    #[tokio::test]
    async fn test_flag_write_failure_is_reported() {
        let defaults = InMemoryDefaults::new();
        let store = SimulatedStore::new(
            settings(PurchaseOutcome::Success),
            Arc::new(RejectsFlag(defaults.clone())),
        );
        let product = store.product(PRO_EDITION);

        assert!(store.purchase_product(&product).await.is_err());
        assert_eq!(defaults.get(PRO_EDITION), None);
    }

    #[tokio::test]
    async fn test_restore_replays_owned_products() {
        let defaults = InMemoryDefaults::new();
        let mut cfg = settings(PurchaseOutcome::Success);
        cfg.previously_purchased = vec![PRO_EDITION.to_string()];
        let store = SimulatedStore::new(cfg, Arc::new(defaults.clone()));

        store.restore().await.unwrap();
        assert_eq!(defaults.get(PRO_EDITION), Some(DefaultValue::Bool(true)));
    }

    #[tokio::test]
    async fn test_restore_with_nothing_owned_succeeds_without_writes() {
        let defaults = InMemoryDefaults::new();
        let store = SimulatedStore::new(
            settings(PurchaseOutcome::Success),
            Arc::new(defaults.clone()),
        );

        store.restore().await.unwrap();
        assert!(defaults.is_empty());
    }

    #[tokio::test]
    async fn test_offline_fails_every_call() {
        let defaults = InMemoryDefaults::new();
        let store = SimulatedStore::new(
            settings(PurchaseOutcome::Offline),
            Arc::new(defaults.clone()),
        );

        assert!(matches!(
            store.request_product_data(PRO_EDITION).await,
            Err(ProviderError::Network { .. })
        ));
        assert!(matches!(
            store.restore().await,
            Err(ProviderError::Network { .. })
        ));
    }
}
