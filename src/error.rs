use crate::pipeline::domain::BranchKind;
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Branch(#[from] BranchError),
    #[error("Failed to store product: {0}")]
    Storage(#[from] StorageError),
}

/// The stage of a `process` call that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validation,
    Extraction,
    Interpretation,
    Storage,
}

impl ProcessError {
    pub fn stage(&self) -> Stage {
        match self {
            ProcessError::Branch(e) => e.stage(),
            ProcessError::Storage(_) => Stage::Storage,
        }
    }

    /// The branch that failed, if the failure happened before the join.
    pub fn branch(&self) -> Option<BranchKind> {
        match self {
            ProcessError::Branch(e) => e.kind(),
            ProcessError::Storage(_) => None,
        }
    }
}

// Branch Error Type
#[derive(Error, Debug)]
pub enum BranchError {
    #[error(transparent)]
    InvalidMode(#[from] InvalidModeError),
    #[error("{kind} text extraction failed: {source}")]
    Extraction {
        kind: BranchKind,
        source: ExtractionError,
    },
    #[error("{kind} interpretation failed: {source}")]
    Interpretation {
        kind: BranchKind,
        source: InterpretationError,
    },
}

impl BranchError {
    pub fn kind(&self) -> Option<BranchKind> {
        match self {
            BranchError::InvalidMode(_) => None,
            BranchError::Extraction { kind, .. } | BranchError::Interpretation { kind, .. } => {
                Some(*kind)
            }
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            BranchError::InvalidMode(_) => Stage::Validation,
            BranchError::Extraction { .. } => Stage::Extraction,
            BranchError::Interpretation { .. } => Stage::Interpretation,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid mode '{mode}': must be 'ingredient' or 'nutrition'")]
pub struct InvalidModeError {
    pub mode: String,
}

#[derive(Error, Debug)]
#[error("{message}")]
pub struct ExtractionError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl ExtractionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
#[error("{message}")]
pub struct InterpretationError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl InterpretationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
#[error("{message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Coordinator is missing its {0}")]
    MissingCollaborator(&'static str),
}
