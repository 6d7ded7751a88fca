pub mod instrument;
pub mod runner;
pub mod service;

pub use instrument::{InstrumentLayer, InstrumentedBranch};
pub use runner::BranchRunner;
pub use service::{BranchCollaborators, BranchRequest, BranchService};
