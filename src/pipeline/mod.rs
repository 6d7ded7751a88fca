pub mod branch;
pub mod collaborators;
pub mod context;
pub mod domain;
pub mod persistence;

pub use branch::{BranchRequest, BranchRunner};
pub use context::{BranchContext, BranchMetrics};
pub use persistence::{PersistenceHandoff, SavedProduct};
