pub mod branch_context;
pub mod metrics;
pub mod state;

pub use branch_context::BranchContext;
pub use metrics::BranchMetrics;
pub use state::{ExtractedState, InterpretedState, ProcessingState, RequestedState};
