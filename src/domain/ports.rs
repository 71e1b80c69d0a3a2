use crate::domain::model::{DefaultValue, ProductMetadata, ProductsResponse, Storable};
use crate::utils::error::{ProviderError, Result};
use async_trait::async_trait;

/// Read side of the persistent key-value cache.
///
/// Reads must be cheap and must not block on writers for longer than a lock
/// acquisition; they are called from synchronous feature queries.
pub trait DefaultValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<DefaultValue>;
}

impl<'a> dyn DefaultValueStore + 'a {
    /// Typed lookup. `None` when the key is absent or holds another kind of value.
    pub fn try_get<T: Storable>(&self, key: &str) -> Option<T> {
        self.get(key).as_ref().and_then(T::from_default)
    }
}

/// Write side of the cache. Handed to purchase providers, never to the
/// features service.
pub trait DefaultValueSink: Send + Sync {
    fn set(&self, key: &str, value: DefaultValue) -> Result<()>;
}

/// Platform marketplace.
///
/// On a successful `purchase_product` or `restore`, the provider is responsible
/// for persisting the entitlement flag (`true` under the product identifier).
#[async_trait]
pub trait PurchaseProvider: Send + Sync {
    async fn request_product_data(
        &self,
        product_id: &str,
    ) -> std::result::Result<ProductsResponse, ProviderError>;

    async fn purchase_product(
        &self,
        product: &ProductMetadata,
    ) -> std::result::Result<(), ProviderError>;

    async fn restore(&self) -> std::result::Result<(), ProviderError>;
}
