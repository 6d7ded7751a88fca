use crate::pipeline::context::metrics::BranchMetrics;
use crate::pipeline::context::state::{
    ExtractedState, InterpretedState, ProcessingState, RequestedState,
};
use crate::pipeline::domain::{AnalysisResult, BranchKind, ImageLocator};
use std::time::{Duration, Instant};

// BranchContext with compile-time stage tracking via the state parameter
pub struct BranchContext<S> {
    kind: BranchKind,
    locator: ImageLocator,
    metrics: BranchMetrics,
    processing_start: Instant,
    state: S,
}

impl<S> BranchContext<S> {
    pub fn kind(&self) -> BranchKind {
        self.kind
    }

    pub fn locator(&self) -> &ImageLocator {
        &self.locator
    }

    pub fn metrics(&self) -> &BranchMetrics {
        &self.metrics
    }

    pub fn elapsed(&self) -> Duration {
        self.processing_start.elapsed()
    }

    pub fn state_name(&self) -> &'static str
    where
        S: ProcessingState,
    {
        S::state_name()
    }
}

impl BranchContext<RequestedState> {
    pub fn new(kind: BranchKind, locator: ImageLocator) -> Self {
        Self {
            kind,
            locator,
            metrics: BranchMetrics::new(),
            processing_start: Instant::now(),
            state: RequestedState,
        }
    }

    pub fn into_extracted(mut self, text: String, took: Duration) -> BranchContext<ExtractedState> {
        self.metrics.record_extraction_duration(took);
        BranchContext::<ExtractedState> {
            kind: self.kind,
            locator: self.locator,
            metrics: self.metrics,
            processing_start: self.processing_start,
            state: ExtractedState { text },
        }
    }
}

impl BranchContext<ExtractedState> {
    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn into_cleaned(mut self, text: String, took: Duration) -> Self {
        self.metrics.record_cleaning_duration(took);
        self.state.text = text;
        self
    }

    pub fn into_interpreted(
        mut self,
        analysis: AnalysisResult,
        took: Duration,
    ) -> BranchContext<InterpretedState> {
        self.metrics.record_interpretation_duration(took);
        self.metrics.finalize(self.processing_start.elapsed());
        BranchContext::<InterpretedState> {
            kind: self.kind,
            locator: self.locator,
            metrics: self.metrics,
            processing_start: self.processing_start,
            state: InterpretedState { analysis },
        }
    }
}

impl BranchContext<InterpretedState> {
    pub fn analysis(&self) -> &AnalysisResult {
        &self.state.analysis
    }

    pub fn into_analysis(self) -> AnalysisResult {
        self.state.analysis
    }
}
