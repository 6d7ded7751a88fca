use crate::error::BranchError;
use crate::pipeline::branch::instrument::{InstrumentLayer, InstrumentedBranch};
use crate::pipeline::branch::service::{BranchCollaborators, BranchRequest, BranchService};
use crate::pipeline::context::{BranchContext, InterpretedState};
use crate::pipeline::domain::{AnalysisResult, BranchKind, ImageLocator};
use crate::telemetry::TelemetryCollector;
use tower::{ServiceBuilder, ServiceExt};

/// Entry point for running a single labelled branch.
#[derive(Clone)]
pub struct BranchRunner {
    service: InstrumentedBranch<BranchService>,
}

impl BranchRunner {
    pub fn new(collaborators: BranchCollaborators, telemetry: TelemetryCollector) -> Self {
        let service = ServiceBuilder::new()
            .layer(InstrumentLayer)
            .service(BranchService::new(collaborators, telemetry));
        Self { service }
    }

    pub async fn run(
        &self,
        locator: ImageLocator,
        kind: BranchKind,
    ) -> Result<AnalysisResult, BranchError> {
        Ok(self.run_context(locator, kind).await?.into_analysis())
    }

    /// Like [`run`](Self::run) but keeps the stage timings.
    pub async fn run_context(
        &self,
        locator: ImageLocator,
        kind: BranchKind,
    ) -> Result<BranchContext<InterpretedState>, BranchError> {
        self.service
            .clone()
            .oneshot(BranchRequest::new(locator, kind))
            .await
    }

    /// Runs a branch named by a raw mode string. Unknown modes fail before
    /// the extractor is called.
    pub async fn run_mode(
        &self,
        locator: ImageLocator,
        mode: &str,
    ) -> Result<AnalysisResult, BranchError> {
        let kind: BranchKind = mode.parse()?;
        self.run(locator, kind).await
    }
}
