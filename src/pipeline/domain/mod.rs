pub mod analysis;
pub mod branch_kind;
pub mod locator;
pub mod product;

pub use analysis::{AnalysisResult, MergedAnalysis};
pub use branch_kind::BranchKind;
pub use locator::{ImageLocator, ImageLocatorSet};
pub use product::{ProductId, ProductRecord, ResponseEnvelope, DEFAULT_PRODUCT_NAME};
