use std::time::Duration;

/// Per-stage timings of a single branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchMetrics {
    extraction_duration: Option<Duration>,
    cleaning_duration: Option<Duration>,
    interpretation_duration: Option<Duration>,
    total_duration: Option<Duration>,
}

impl BranchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_extraction_duration(&mut self, duration: Duration) {
        self.extraction_duration = Some(duration);
    }

    pub fn record_cleaning_duration(&mut self, duration: Duration) {
        self.cleaning_duration = Some(duration);
    }

    pub fn record_interpretation_duration(&mut self, duration: Duration) {
        self.interpretation_duration = Some(duration);
    }

    pub fn finalize(&mut self, total: Duration) {
        self.total_duration = Some(total);
    }

    pub fn extraction_duration(&self) -> Option<Duration> {
        self.extraction_duration
    }

    /// `None` for branches that skip cleaning.
    pub fn cleaning_duration(&self) -> Option<Duration> {
        self.cleaning_duration
    }

    pub fn interpretation_duration(&self) -> Option<Duration> {
        self.interpretation_duration
    }

    pub fn total_duration(&self) -> Option<Duration> {
        self.total_duration
    }
}
