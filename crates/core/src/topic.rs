//! Topic catalog entries and explanation modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A requested explanatory style.
///
/// The mode chosen when a path is built decides which visualization each
/// key-point step is tagged with; it carries no behavior of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationMode {
    Diagram,
    Analogy,
    Technical,
    Practical,
}

/// Error returned when a mode string does not match any known mode.
#[derive(Debug, thiserror::Error)]
#[error("unknown explanation mode: '{0}'")]
pub struct ParseModeError(pub String);

impl ExplanationMode {
    /// Parses a mode string, falling back to [`ExplanationMode::Diagram`]
    /// with a warning when the value is not recognized.
    ///
    /// This preserves the observable default of the engine at text
    /// boundaries while keeping the strict [`FromStr`] parse available.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(mode = %s, "unrecognized explanation mode, defaulting to 'diagram'");
            ExplanationMode::Diagram
        })
    }
}

impl FromStr for ExplanationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diagram" => Ok(ExplanationMode::Diagram),
            "analogy" => Ok(ExplanationMode::Analogy),
            "technical" => Ok(ExplanationMode::Technical),
            "practical" => Ok(ExplanationMode::Practical),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

impl fmt::Display for ExplanationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ExplanationMode::Diagram => "diagram",
            ExplanationMode::Analogy => "analogy",
            ExplanationMode::Technical => "technical",
            ExplanationMode::Practical => "practical",
        };
        write!(f, "{}", tag)
    }
}

/// One subject in the topic catalog.
///
/// Immutable once loaded. `key_points` is teaching order: the path builder
/// emits one step per entry, in sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub key_points: Vec<String>,
    pub available_modes: Vec<ExplanationMode>,
}

impl Topic {
    /// Creates a topic offering every explanation mode.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        key_points: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            key_points,
            available_modes: vec![
                ExplanationMode::Diagram,
                ExplanationMode::Analogy,
                ExplanationMode::Technical,
                ExplanationMode::Practical,
            ],
        }
    }
}
