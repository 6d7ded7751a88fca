use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured output of an interpreter call.
///
/// The shape is owned by the language model prompt, so it is kept as raw JSON.
/// Ingredient analyses are expected, but not guaranteed, to carry
/// `basicInfo.name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Value);

impl AnalysisResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Follows `path` through nested objects, returning `None` as soon as a
    /// segment is missing or the current value is not an object.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.0, |value, key| value.as_object()?.get(*key))
    }

    /// `basicInfo.name`, when present as a non-empty string.
    pub fn product_name(&self) -> Option<&str> {
        self.lookup(&["basicInfo", "name"])
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }
}

impl From<Value> for AnalysisResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Both branch results, each in the slot of the branch that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedAnalysis {
    pub ingredient_analysis: AnalysisResult,
    pub nutrition_analysis: AnalysisResult,
}

impl MergedAnalysis {
    pub fn new(ingredient_analysis: AnalysisResult, nutrition_analysis: AnalysisResult) -> Self {
        Self {
            ingredient_analysis,
            nutrition_analysis,
        }
    }

    pub fn product_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.ingredient_analysis.product_name().unwrap_or(default)
    }
}
