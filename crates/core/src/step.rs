//! Explanation step data model.
//!
//! Steps are the nodes of the explanation graph: content text, a
//! visualization tag plus its payload, and the interaction prompts attached
//! to the step. Navigation and signaling are structurally distinct option
//! kinds so consumers can match on them exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::topic::ExplanationMode;

/// Tags which rendering strategy a consumer should use for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizationType {
    ProgressiveDiagram,
    AnimatedAnalogy,
    ContextualExample,
}

impl fmt::Display for VisualizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            VisualizationType::ProgressiveDiagram => "progressive-diagram",
            VisualizationType::AnimatedAnalogy => "animated-analogy",
            VisualizationType::ContextualExample => "contextual-example",
        };
        write!(f, "{}", tag)
    }
}

/// Structured payload handed through to the rendering collaborator.
///
/// One variant per payload shape the engine emits, keyed by a `type` tag on
/// the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum VisualData {
    /// Opening payload for the introduction step.
    Introduction { topic: String },
    /// One key point, carried with the mode the path was built in.
    Concept {
        mode: ExplanationMode,
        content: String,
        topic_title: String,
    },
    /// Closing payload; re-lists the key points for the recap.
    Summary { key_points: Vec<String> },
    /// Transient answer step synthesized from a learner question.
    DynamicAnswer {
        question: String,
        context_step_id: String,
    },
}

/// Symbolic action an option can request, distinct from direct navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionAction {
    Continue,
    Deeper,
    Analogy,
    Example,
}

/// What selecting an option means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum OptionKind {
    /// Jump directly to the named step, overriding default flow.
    Navigate { target_step_id: String },
    /// Request a symbolic action; never navigates by itself.
    Signal { action: OptionAction },
    /// Request a switch of explanation mode.
    SwitchMode { mode: ExplanationMode },
}

/// One selectable choice on an interaction prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOption {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub kind: OptionKind,
}

impl InteractionOption {
    pub fn navigate(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        target_step_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            kind: OptionKind::Navigate {
                target_step_id: target_step_id.into(),
            },
        }
    }

    pub fn signal(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        action: OptionAction,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            kind: OptionKind::Signal { action },
        }
    }
}

/// The kind of prompt an interaction point presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Pause,
    Branch,
    /// Also offers a free-text question box in the rendering layer.
    Question,
}

/// A decision prompt attached to a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionPoint {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub prompt_text: String,
    pub options: Vec<InteractionOption>,
}

/// One node in the explanation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationStep {
    pub id: String,
    pub content: String,
    pub visual_type: VisualizationType,
    pub visual_data: VisualData,
    pub interaction_points: Vec<InteractionPoint>,
    /// Step ids reachable by default "continue" navigation; empty for
    /// terminal steps.
    pub next_steps: Vec<String>,
}

impl ExplanationStep {
    /// Finds an option by id across this step's interaction points.
    pub fn find_option(&self, option_id: &str) -> Option<&InteractionOption> {
        self.interaction_points
            .iter()
            .flat_map(|p| p.options.iter())
            .find(|o| o.id == option_id)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_steps.is_empty()
    }
}
