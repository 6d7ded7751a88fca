//! Interfaces of the external systems the coordinator drives.
//!
//! None of these are implemented here beyond trivial defaults: OCR, language
//! model inference and the document store belong to the surrounding service.

use crate::error::{ExtractionError, InterpretationError, StorageError};
use crate::pipeline::domain::{AnalysisResult, ImageLocator, ProductId, ProductRecord};
use async_trait::async_trait;

/// Optical character recognition over a single image.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, locator: &ImageLocator) -> Result<String, ExtractionError>;
}

/// Normalises ingredient text before interpretation. Expected not to fail.
#[async_trait]
pub trait TextCleaner: Send + Sync {
    async fn clean_text(&self, text: &str) -> String;
}

/// Language model interpretation of extracted text.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret_ingredient(&self, text: &str) -> Result<AnalysisResult, InterpretationError>;

    async fn interpret_nutrition(&self, text: &str) -> Result<AnalysisResult, InterpretationError>;
}

/// Durable product storage.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn store(&self, record: &ProductRecord) -> Result<ProductId, StorageError>;
}

/// Passes text through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCleaner;

#[async_trait]
impl TextCleaner for IdentityCleaner {
    async fn clean_text(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Collapses runs of whitespace, including the line breaks OCR inserts
/// between label columns, into single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceCleaner;

#[async_trait]
impl TextCleaner for WhitespaceCleaner {
    async fn clean_text(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
