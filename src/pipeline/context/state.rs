use crate::pipeline::domain::AnalysisResult;

// Markers to track the state of a branch as it moves through its stages
pub struct RequestedState;
pub struct ExtractedState {
    pub(super) text: String,
}
pub struct InterpretedState {
    pub(super) analysis: AnalysisResult,
}

pub trait ProcessingState: 'static {
    fn state_name() -> &'static str;
}

impl ProcessingState for RequestedState {
    fn state_name() -> &'static str {
        "Requested"
    }
}

impl ProcessingState for ExtractedState {
    fn state_name() -> &'static str {
        "Extracted"
    }
}

impl ProcessingState for InterpretedState {
    fn state_name() -> &'static str {
        "Interpreted"
    }
}
