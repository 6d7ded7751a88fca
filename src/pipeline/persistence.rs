use crate::error::StorageError;
use crate::pipeline::collaborators::ProductStore;
use crate::pipeline::domain::{ImageLocatorSet, MergedAnalysis, ProductId, ProductRecord};
use std::sync::Arc;
use tracing::debug;

/// A record the store accepted, together with the id it assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedProduct {
    pub id: ProductId,
    pub record: ProductRecord,
}

/// Shapes the product record and hands it to the store unchanged.
#[derive(Clone)]
pub struct PersistenceHandoff {
    store: Arc<dyn ProductStore>,
}

impl PersistenceHandoff {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn save(
        &self,
        image_locators: ImageLocatorSet,
        product_name: String,
        merged: MergedAnalysis,
    ) -> Result<SavedProduct, StorageError> {
        let record = ProductRecord::new(image_locators, product_name, merged);
        let id = self.store.store(&record).await?;
        debug!(product_id = %id, "Product record stored");
        Ok(SavedProduct { id, record })
    }
}
