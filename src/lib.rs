pub mod config;
pub mod coordinator;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod telemetry;

pub use config::Configuration;
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use error::{
    BranchError, ConfigError, ExtractionError, InterpretationError, InvalidModeError,
    ProcessError, Stage, StorageError,
};
pub use pipeline::collaborators::{
    IdentityCleaner, Interpreter, ProductStore, TextCleaner, TextExtractor, WhitespaceCleaner,
};
pub use pipeline::domain::{
    AnalysisResult, BranchKind, ImageLocator, ImageLocatorSet, MergedAnalysis, ProductId,
    ProductRecord, ResponseEnvelope, DEFAULT_PRODUCT_NAME,
};
pub use store::InMemoryProductStore;
pub use telemetry::{init_logging, TelemetryCollector, TelemetrySink, TracingSink};
