use crate::error::StorageError;
use crate::pipeline::collaborators::ProductStore;
use crate::pipeline::domain::{ProductId, ProductRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredProduct {
    pub record: ProductRecord,
    pub stored_at: DateTime<Utc>,
}

/// Process-local product store assigning random v4 ids.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<ProductId, StoredProduct>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &ProductId) -> Option<StoredProduct> {
        self.products.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn store(&self, record: &ProductRecord) -> Result<ProductId, StorageError> {
        let id = ProductId::new(Uuid::new_v4().simple().to_string());
        let stored = StoredProduct {
            record: record.clone(),
            stored_at: Utc::now(),
        };
        self.products.write().await.insert(id.clone(), stored);
        Ok(id)
    }
}
