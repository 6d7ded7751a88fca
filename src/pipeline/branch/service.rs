use crate::error::BranchError;
use crate::pipeline::collaborators::{Interpreter, TextCleaner, TextExtractor};
use crate::pipeline::context::{BranchContext, InterpretedState};
use crate::pipeline::domain::{BranchKind, ImageLocator};
use crate::telemetry::TelemetryCollector;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::Service;

/// One extract-then-interpret request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRequest {
    pub locator: ImageLocator,
    pub kind: BranchKind,
}

impl BranchRequest {
    pub fn new(locator: ImageLocator, kind: BranchKind) -> Self {
        Self { locator, kind }
    }
}

/// The external calls a branch is composed from.
#[derive(Clone)]
pub struct BranchCollaborators {
    pub extractor: Arc<dyn TextExtractor>,
    pub cleaner: Arc<dyn TextCleaner>,
    pub interpreter: Arc<dyn Interpreter>,
}

/// Runs extractor, then cleaner for ingredient text, then the interpreter
/// variant matching the branch kind.
#[derive(Clone)]
pub struct BranchService {
    collaborators: BranchCollaborators,
    telemetry: TelemetryCollector,
}

impl BranchService {
    pub fn new(collaborators: BranchCollaborators, telemetry: TelemetryCollector) -> Self {
        Self {
            collaborators,
            telemetry,
        }
    }
}

impl Service<BranchRequest> for BranchService {
    type Response = BranchContext<InterpretedState>;
    type Error = BranchError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: BranchRequest) -> Self::Future {
        let collaborators = self.collaborators.clone();
        let telemetry = self.telemetry.clone();

        Box::pin(async move {
            let kind = req.kind;
            let context = BranchContext::new(kind, req.locator);

            let started = Instant::now();
            let text = collaborators
                .extractor
                .extract_text(context.locator())
                .await
                .map_err(|source| BranchError::Extraction { kind, source })?;
            let mut context = context.into_extracted(text, started.elapsed());
            telemetry.notify_text_extracted(kind, context.text());

            if kind.requires_cleaning() {
                let started = Instant::now();
                let cleaned = collaborators.cleaner.clean_text(context.text()).await;
                context = context.into_cleaned(cleaned, started.elapsed());
            }

            let started = Instant::now();
            let analysis = match kind {
                BranchKind::Ingredient => {
                    collaborators
                        .interpreter
                        .interpret_ingredient(context.text())
                        .await
                }
                BranchKind::Nutrition => {
                    collaborators
                        .interpreter
                        .interpret_nutrition(context.text())
                        .await
                }
            }
            .map_err(|source| BranchError::Interpretation { kind, source })?;
            let context = context.into_interpreted(analysis, started.elapsed());
            tracing::debug!(%kind, state = context.state_name(), "Branch finished");

            telemetry.notify_branch_completed(kind, context.metrics());
            Ok(context)
        })
    }
}
