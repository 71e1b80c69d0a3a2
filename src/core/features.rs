use crate::core::entitlement_store::EntitlementStore;
use crate::domain::model::{EntitlementState, Feature, PRO_EDITION};
use crate::domain::ports::PurchaseProvider;
use crate::utils::error::{EntitlementError, Result};

/// Answers "is feature F unlocked?" and drives the purchase and restore workflows.
///
/// Queries read the cached flag only. The workflows hand all persistence to the
/// provider; this type never writes the cache.
pub struct FeaturesService<P: PurchaseProvider> {
    entitlements: EntitlementStore,
    provider: P,
}

impl<P: PurchaseProvider> FeaturesService<P> {
    pub fn new(entitlements: EntitlementStore, provider: P) -> Self {
        Self {
            entitlements,
            provider,
        }
    }

    pub fn is_push_notifications_activated(&self) -> bool {
        self.is_feature_enabled(Feature::PushNotifications)
    }

    pub fn is_enterprise_support_activated(&self) -> bool {
        self.is_feature_enabled(Feature::EnterpriseSupport)
    }

    pub fn is_private_repositories_enabled(&self) -> bool {
        self.is_feature_enabled(Feature::PrivateRepositories)
    }

    pub fn is_pro_enabled(&self) -> bool {
        self.is_feature_enabled(Feature::Pro)
    }

    pub fn is_feature_enabled(&self, feature: Feature) -> bool {
        self.entitlements.is_entitled(feature.product_id())
    }

    pub fn pro_state(&self) -> EntitlementState {
        self.entitlements.state(PRO_EDITION)
    }

    /// Looks up the pro product and asks the provider to buy the first record
    /// the query returns.
    ///
    /// Fails with [`EntitlementError::ProductUnavailable`] without attempting a
    /// purchase when the query returns nothing. Provider errors are returned
    /// as-is. Callers re-query the feature accessors afterwards.
    pub async fn activate_pro(&self) -> Result<()> {
        tracing::debug!("Requesting product data for {}", PRO_EDITION);
        let response = self.provider.request_product_data(PRO_EDITION).await?;

        let product = response
            .products
            .into_iter()
            .next()
            .ok_or_else(|| EntitlementError::ProductUnavailable {
                product_id: PRO_EDITION.to_string(),
            })?;

        tracing::debug!("Purchasing {} ({})", product.identifier, product.title);
        self.provider.purchase_product(&product).await?;
        Ok(())
    }

    pub async fn restore_pro(&self) -> Result<()> {
        tracing::debug!("Restoring previous purchases");
        self.provider.restore().await?;
        Ok(())
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
