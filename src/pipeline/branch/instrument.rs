use crate::error::BranchError;
use crate::pipeline::branch::service::BranchRequest;
use futures::future::BoxFuture;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::Service;
use tower_layer::Layer;
use tracing::{Instrument, debug, info_span};

/// Wraps a branch service with a span plus timing and error logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstrumentLayer;

impl<S> Layer<S> for InstrumentLayer {
    type Service = InstrumentedBranch<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InstrumentedBranch { inner }
    }
}

#[derive(Debug, Clone)]
pub struct InstrumentedBranch<S> {
    inner: S,
}

impl<S> InstrumentedBranch<S> {
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> Service<BranchRequest> for InstrumentedBranch<S>
where
    S: Service<BranchRequest, Error = BranchError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
{
    type Response = S::Response;
    type Error = BranchError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: BranchRequest) -> Self::Future {
        let span = info_span!("branch", kind = %req.kind, locator = %req.locator);
        let kind = req.kind;
        let future = self.inner.call(req);

        Box::pin(
            async move {
                let start = Instant::now();
                debug!("Starting {} branch", kind);

                let result = future.await;
                let duration_us = start.elapsed().as_micros() as u64;

                match &result {
                    Ok(_) => debug!("Completed {} branch successfully in {}us", kind, duration_us),
                    Err(e) => debug!("{} branch failed after {}us: {}", kind, duration_us, e),
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::pipeline::domain::{BranchKind, ImageLocator};
    use crate::telemetry::CapturedLogs;
    use tower::{ServiceExt, service_fn};

    #[tokio::test]
    async fn test_branch_failure_is_logged_below_error_level() {
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber());

        let service = InstrumentLayer.layer(service_fn(|req: BranchRequest| async move {
            Err::<(), _>(BranchError::Extraction {
                kind: req.kind,
                source: ExtractionError::new("ocr down"),
            })
        }));
        let result = service
            .oneshot(BranchRequest::new(
                ImageLocator::from("front.jpg"),
                BranchKind::Ingredient,
            ))
            .await;

        assert!(result.is_err());
        let output = logs.contents();
        assert!(output.contains("ingredient branch failed after"), "{output}");
        assert!(!output.contains("ERROR"), "{output}");
    }
}
