//! Explanation path traversal state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::step::ExplanationStep;
use crate::topic::ExplanationMode;

/// One record in a path's append-only interaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInteraction {
    pub timestamp: DateTime<Utc>,
    /// Step that was current when the option was selected.
    pub step_id: String,
    pub option_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_mode: Option<ExplanationMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_question: Option<String>,
}

/// Live traversal state for one topic session.
///
/// `steps` is fixed after construction; only the cursor, the visit history,
/// and the interaction log mutate during traversal, and only through the
/// session layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationPath {
    pub topic_id: String,
    pub steps: Vec<ExplanationStep>,
    pub current_step_id: String,
    /// Ordered history of previously-current step ids; the step being left
    /// is appended on every move.
    pub visited_step_ids: Vec<String>,
    pub user_interactions: Vec<UserInteraction>,
}

impl ExplanationPath {
    /// Looks up a step of this path by id.
    pub fn step(&self, id: &str) -> Option<&ExplanationStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// The step `current_step_id` points at, if it names a path step.
    pub fn current_step(&self) -> Option<&ExplanationStep> {
        self.step(&self.current_step_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{VisualData, VisualizationType};

    fn step(id: &str) -> ExplanationStep {
        ExplanationStep {
            id: id.to_string(),
            content: String::new(),
            visual_type: VisualizationType::ProgressiveDiagram,
            visual_data: VisualData::Introduction {
                topic: "T".to_string(),
            },
            interaction_points: vec![],
            next_steps: vec![],
        }
    }

    #[test]
    fn step_lookup_by_id() {
        let path = ExplanationPath {
            topic_id: "t1".to_string(),
            steps: vec![step("t1-intro"), step("t1-summary")],
            current_step_id: "t1-intro".to_string(),
            visited_step_ids: vec![],
            user_interactions: vec![],
        };

        assert_eq!(path.step("t1-summary").unwrap().id, "t1-summary");
        assert!(path.step("t1-step-9").is_none());
        assert_eq!(path.current_step().unwrap().id, "t1-intro");
    }

    #[test]
    fn interaction_log_serializes_without_empty_optionals() {
        let record = UserInteraction {
            timestamp: Utc::now(),
            step_id: "t1-intro".to_string(),
            option_id: "continue".to_string(),
            selected_mode: None,
            user_question: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"stepId\":\"t1-intro\""));
        assert!(!json.contains("selectedMode"));
        assert!(!json.contains("userQuestion"));
    }
}
