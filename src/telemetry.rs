use crate::config::Configuration;
use crate::error::ProcessError;
use crate::pipeline::context::BranchMetrics;
use crate::pipeline::domain::{BranchKind, MergedAnalysis, ProductId};
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. `RUST_LOG` wins over the
/// configured `log_filter`.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(configuration: &Configuration) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&configuration.log_filter)),
        )
        .try_init()
        .is_ok()
}

/// Observer for the coordinator's diagnostic side channel.
///
/// Callbacks run inline on the request's task, so implementations should be
/// cheap and must not block.
pub trait TelemetrySink: Send + Sync {
    /// Raw extractor output, before any cleaning.
    fn on_text_extracted(&self, _kind: BranchKind, _text: &str) {}
    fn on_branch_completed(&self, _kind: BranchKind, _metrics: &BranchMetrics) {}
    /// Both branches finished; runs before the product name is derived.
    fn on_branches_joined(&self, _merged: &MergedAnalysis) {}
    fn on_product_saved(&self, _id: &ProductId, _product_name: &str) {}
    fn on_process_failed(&self, _error: &ProcessError) {}
}

/// Fans every event out to the registered sinks.
#[derive(Clone, Default)]
pub struct TelemetryCollector {
    sinks: Vec<Arc<dyn TelemetrySink>>,
}

impl TelemetryCollector {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn notify_text_extracted(&self, kind: BranchKind, text: &str) {
        for sink in &self.sinks {
            sink.on_text_extracted(kind, text);
        }
    }

    pub fn notify_branch_completed(&self, kind: BranchKind, metrics: &BranchMetrics) {
        for sink in &self.sinks {
            sink.on_branch_completed(kind, metrics);
        }
    }

    pub fn notify_branches_joined(&self, merged: &MergedAnalysis) {
        for sink in &self.sinks {
            sink.on_branches_joined(merged);
        }
    }

    pub fn notify_product_saved(&self, id: &ProductId, product_name: &str) {
        for sink in &self.sinks {
            sink.on_product_saved(id, product_name);
        }
    }

    pub fn notify_process_failed(&self, error: &ProcessError) {
        for sink in &self.sinks {
            sink.on_process_failed(error);
        }
    }
}

/// Default sink: writes every event to `tracing`.
pub struct TracingSink {
    trace_text: bool,
    text_limit: usize,
}

impl TracingSink {
    pub fn new(trace_text: bool, text_limit: usize) -> Self {
        Self {
            trace_text,
            text_limit,
        }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(true, 2000)
    }
}

impl TelemetrySink for TracingSink {
    fn on_text_extracted(&self, kind: BranchKind, text: &str) {
        if !self.trace_text {
            return;
        }
        let shown = truncate_chars(text, self.text_limit);
        debug!(
            %kind,
            chars = text.chars().count(),
            truncated = shown.len() < text.len(),
            "[{} OCR] {}",
            kind.as_str().to_uppercase(),
            shown
        );
    }

    fn on_branch_completed(&self, kind: BranchKind, metrics: &BranchMetrics) {
        debug!(
            %kind,
            extraction_us = micros(metrics.extraction_duration()),
            cleaning_us = micros(metrics.cleaning_duration()),
            interpretation_us = micros(metrics.interpretation_duration()),
            total_us = micros(metrics.total_duration()),
            "Branch completed"
        );
    }

    fn on_branches_joined(&self, _merged: &MergedAnalysis) {
        info!("Both analyses complete");
    }

    fn on_product_saved(&self, id: &ProductId, product_name: &str) {
        info!(product_id = %id, product_name, "Product analysis saved");
    }

    fn on_process_failed(&self, error: &ProcessError) {
        error!(stage = ?error.stage(), branch = ?error.branch(), "Product analysis failed: {}", error);
    }
}

fn micros(duration: Option<std::time::Duration>) -> u64 {
    duration.map_or(0, |d| d.as_micros() as u64)
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}


/// Captures formatted `tracing` output in memory.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    buffer: Arc<std::sync::Mutex<Vec<u8>>>,
}

#[cfg(test)]
impl CapturedLogs {
    pub(crate) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let logs = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || logs.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish()
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
