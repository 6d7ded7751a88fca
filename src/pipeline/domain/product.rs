use super::{ImageLocatorSet, MergedAnalysis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product name used when the ingredient analysis does not name the product.
pub const DEFAULT_PRODUCT_NAME: &str = "Unknown Product";

/// Identifier assigned by the product store.
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

/// The document handed to the product store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "imageUrls")]
    pub image_locators: ImageLocatorSet,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "result")]
    pub merged: MergedAnalysis,
}

impl ProductRecord {
    pub fn new(image_locators: ImageLocatorSet, product_name: String, merged: MergedAnalysis) -> Self {
        Self {
            image_locators,
            product_name,
            merged,
        }
    }

    pub fn into_envelope(self, product_id: ProductId) -> ResponseEnvelope {
        ResponseEnvelope {
            product_id,
            product_name: self.product_name,
            result: self.merged,
        }
    }
}

/// What `process` returns to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub product_id: ProductId,
    pub product_name: String,
    pub result: MergedAnalysis,
}
