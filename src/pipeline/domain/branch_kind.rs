use crate::error::InvalidModeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two extract-then-interpret pipelines a branch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    Ingredient,
    Nutrition,
}

impl BranchKind {
    pub const ALL: [BranchKind; 2] = [BranchKind::Ingredient, BranchKind::Nutrition];

    pub fn as_str(&self) -> &'static str {
        match self {
            BranchKind::Ingredient => "ingredient",
            BranchKind::Nutrition => "nutrition",
        }
    }

    /// Only the ingredient text goes through the cleaner before interpretation.
    pub fn requires_cleaning(&self) -> bool {
        matches!(self, BranchKind::Ingredient)
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BranchKind {
    type Err = InvalidModeError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "ingredient" => Ok(BranchKind::Ingredient),
            "nutrition" => Ok(BranchKind::Nutrition),
            other => Err(InvalidModeError {
                mode: other.to_string(),
            }),
        }
    }
}

impl TryFrom<&str> for BranchKind {
    type Error = InvalidModeError;

    fn try_from(mode: &str) -> Result<Self, Self::Error> {
        mode.parse()
    }
}
