//! Adaptive Explanation Engine
//!
//! Deterministically converts one topic plus a requested mode into a complete
//! explanation path: an introduction step, one step per key point, and a
//! summary step, linked by default-continue edges plus a single designed
//! cycle (the summary's "review" option back to the introduction).
//!
//! The engine is pure and stateless: every call reads the topic it is given
//! and allocates a fresh, independent path, so it is safe to drive any number
//! of concurrent sessions without coordination.

use chrono::Utc;
use tracing::debug;

use crate::path::ExplanationPath;
use crate::step::{
    ExplanationStep, InteractionKind, InteractionOption, InteractionPoint, OptionAction,
    VisualData, VisualizationType,
};
use crate::topic::{ExplanationMode, Topic};

/// Failure while building an explanation path.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A path over zero key points would leave the introduction step
    /// pointing at a step that does not exist, so the builder rejects it.
    #[error("topic '{0}' has no key points to build a path from")]
    EmptyKeyPoints(String),
}

/// Pure path-construction functions. No hidden state.
pub struct ExplanationEngine;

impl ExplanationEngine {
    /// Determines which explanatory approaches suit a topic.
    ///
    /// Diagrams always apply; the technical mode is only offered for topics
    /// with enough detail to warrant it.
    pub fn analyze_approaches(topic: &Topic) -> Vec<ExplanationMode> {
        let mut approaches = vec![ExplanationMode::Diagram];
        if topic.key_points.len() > 3 {
            approaches.push(ExplanationMode::Technical);
        }
        approaches.push(ExplanationMode::Analogy);
        approaches.push(ExplanationMode::Practical);
        approaches
    }

    /// Builds the full explanation path for a topic in the requested mode.
    ///
    /// The returned path starts at the introduction step with empty visit
    /// history and interaction log.
    pub fn build_path(topic: &Topic, mode: ExplanationMode) -> Result<ExplanationPath, EngineError> {
        if topic.key_points.is_empty() {
            return Err(EngineError::EmptyKeyPoints(topic.id.clone()));
        }

        let steps = Self::generate_steps(topic, mode);
        debug!(topic = %topic.id, %mode, steps = steps.len(), "built explanation path");

        let current_step_id = steps[0].id.clone();
        Ok(ExplanationPath {
            topic_id: topic.id.clone(),
            steps,
            current_step_id,
            visited_step_ids: Vec::new(),
            user_interactions: Vec::new(),
        })
    }

    fn generate_steps(topic: &Topic, mode: ExplanationMode) -> Vec<ExplanationStep> {
        let mut steps = Vec::with_capacity(topic.key_points.len() + 2);

        steps.push(ExplanationStep {
            id: format!("{}-intro", topic.id),
            content: format!("Let's explore {}. {}", topic.title, topic.description),
            visual_type: VisualizationType::ProgressiveDiagram,
            visual_data: VisualData::Introduction {
                topic: topic.title.clone(),
            },
            interaction_points: vec![InteractionPoint {
                id: "intro-checkpoint".to_string(),
                kind: InteractionKind::Pause,
                prompt_text: "Ready to begin?".to_string(),
                options: vec![
                    InteractionOption::signal("continue", "Let's go!", "✅", OptionAction::Continue),
                    InteractionOption::signal(
                        "change-mode",
                        "Show me differently",
                        "🔄",
                        OptionAction::Analogy,
                    ),
                ],
            }],
            next_steps: vec![format!("{}-step-1", topic.id)],
        });

        for (index, point) in topic.key_points.iter().enumerate() {
            let step_id = format!("{}-step-{}", topic.id, index + 1);
            let next = if index < topic.key_points.len() - 1 {
                format!("{}-step-{}", topic.id, index + 2)
            } else {
                format!("{}-summary", topic.id)
            };

            steps.push(ExplanationStep {
                id: step_id.clone(),
                content: point.clone(),
                visual_type: Self::visualization_for(mode),
                visual_data: VisualData::Concept {
                    mode,
                    content: point.clone(),
                    topic_title: topic.title.clone(),
                },
                interaction_points: vec![Self::key_point_interaction(&step_id)],
                next_steps: vec![next],
            });
        }

        steps.push(ExplanationStep {
            id: format!("{}-summary", topic.id),
            content: format!(
                "Great! You've learned about {}. Let's recap the key concepts.",
                topic.title
            ),
            visual_type: VisualizationType::ContextualExample,
            visual_data: VisualData::Summary {
                key_points: topic.key_points.clone(),
            },
            interaction_points: vec![InteractionPoint {
                id: "summary-checkpoint".to_string(),
                kind: InteractionKind::Question,
                prompt_text: "How are you feeling about this topic?".to_string(),
                options: vec![
                    InteractionOption::signal(
                        "confident",
                        "I understand it!",
                        "🎯",
                        OptionAction::Continue,
                    ),
                    // The one designed cycle in the graph.
                    InteractionOption::navigate(
                        "review",
                        "Let me review",
                        "🔄",
                        format!("{}-intro", topic.id),
                    ),
                    InteractionOption::signal("deeper", "Tell me more", "🔍", OptionAction::Deeper),
                ],
            }],
            next_steps: vec![],
        });

        steps
    }

    /// Maps the requested mode to the visualization used for key-point steps.
    fn visualization_for(mode: ExplanationMode) -> VisualizationType {
        match mode {
            ExplanationMode::Diagram => VisualizationType::ProgressiveDiagram,
            ExplanationMode::Analogy => VisualizationType::AnimatedAnalogy,
            ExplanationMode::Technical | ExplanationMode::Practical => {
                VisualizationType::ContextualExample
            }
        }
    }

    fn key_point_interaction(step_id: &str) -> InteractionPoint {
        InteractionPoint {
            id: format!("{}-interaction", step_id),
            kind: InteractionKind::Pause,
            prompt_text: "Got it so far?".to_string(),
            options: vec![
                InteractionOption::signal("continue", "Continue", "✅", OptionAction::Continue),
                InteractionOption::signal("analogy", "Show analogy", "🤔", OptionAction::Analogy),
                InteractionOption::signal("technical", "More details", "🔍", OptionAction::Deeper),
            ],
        }
    }

    /// Synthesizes a transient step answering a learner question.
    ///
    /// The step is not part of any path's `steps` sequence; the caller is
    /// responsible for splicing it into the session it belongs to. Its id
    /// carries a millisecond suffix so repeated questions on the same step
    /// stay distinct.
    pub fn question_branch(current_step_id: &str, question: &str) -> ExplanationStep {
        ExplanationStep {
            id: format!("{}-branch-{}", current_step_id, Utc::now().timestamp_millis()),
            content: format!("Let me explain: {}", question),
            visual_type: VisualizationType::ContextualExample,
            visual_data: VisualData::DynamicAnswer {
                question: question.to_string(),
                context_step_id: current_step_id.to_string(),
            },
            interaction_points: vec![InteractionPoint {
                id: "branch-return".to_string(),
                kind: InteractionKind::Question,
                prompt_text: "Does that help?".to_string(),
                options: vec![
                    InteractionOption::navigate(
                        "back",
                        "Yes, let's continue",
                        "✅",
                        current_step_id,
                    ),
                    InteractionOption::signal("deeper", "Tell me more", "🔍", OptionAction::Deeper),
                ],
            }],
            next_steps: vec![current_step_id.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::OptionKind;

    fn topic(id: &str, points: &[&str]) -> Topic {
        Topic::new(
            id,
            "Test Topic",
            "A topic for testing.",
            points.iter().map(|p| p.to_string()).collect(),
        )
    }

    #[test]
    fn path_has_intro_key_point_and_summary_steps_in_order() {
        let topic = topic("t1", &["A", "B", "C"]);
        let path = ExplanationEngine::build_path(&topic, ExplanationMode::Diagram).unwrap();

        let ids: Vec<&str> = path.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["t1-intro", "t1-step-1", "t1-step-2", "t1-step-3", "t1-summary"]
        );
    }

    #[test]
    fn fresh_path_starts_at_intro_with_empty_history() {
        let topic = topic("t1", &["A"]);
        let path = ExplanationEngine::build_path(&topic, ExplanationMode::Diagram).unwrap();

        assert_eq!(path.current_step_id, "t1-intro");
        assert!(path.visited_step_ids.is_empty());
        assert!(path.user_interactions.is_empty());
    }

    #[test]
    fn next_steps_chain_every_step_to_its_successor() {
        let topic = topic("t1", &["A", "B"]);
        let path = ExplanationEngine::build_path(&topic, ExplanationMode::Diagram).unwrap();

        for pair in path.steps.windows(2) {
            assert_eq!(pair[0].next_steps, vec![pair[1].id.clone()]);
        }
        assert!(path.steps.last().unwrap().next_steps.is_empty());
    }

    #[test]
    fn two_point_diagram_path_matches_expected_shape() {
        let topic = topic("t1", &["A", "B"]);
        let path = ExplanationEngine::build_path(&topic, ExplanationMode::Diagram).unwrap();

        assert_eq!(path.step("t1-step-1").unwrap().next_steps, vec!["t1-step-2"]);
        assert_eq!(path.step("t1-step-2").unwrap().next_steps, vec!["t1-summary"]);
        assert!(path.step("t1-summary").unwrap().next_steps.is_empty());
    }

    #[test]
    fn requested_mode_decides_key_point_visualization() {
        let topic = topic("t1", &["A", "B"]);

        let cases = [
            (ExplanationMode::Diagram, VisualizationType::ProgressiveDiagram),
            (ExplanationMode::Analogy, VisualizationType::AnimatedAnalogy),
            (ExplanationMode::Technical, VisualizationType::ContextualExample),
            (ExplanationMode::Practical, VisualizationType::ContextualExample),
        ];

        for (mode, expected) in cases {
            let path = ExplanationEngine::build_path(&topic, mode).unwrap();
            for step in &path.steps[1..path.steps.len() - 1] {
                assert_eq!(step.visual_type, expected, "mode {:?}", mode);
            }
        }
    }

    #[test]
    fn intro_and_summary_visualizations_are_fixed() {
        let topic = topic("t1", &["A"]);
        let path = ExplanationEngine::build_path(&topic, ExplanationMode::Analogy).unwrap();

        assert_eq!(
            path.step("t1-intro").unwrap().visual_type,
            VisualizationType::ProgressiveDiagram
        );
        assert_eq!(
            path.step("t1-summary").unwrap().visual_type,
            VisualizationType::ContextualExample
        );
    }

    #[test]
    fn summary_review_option_navigates_back_to_intro() {
        let topic = topic("t1", &["A"]);
        let path = ExplanationEngine::build_path(&topic, ExplanationMode::Diagram).unwrap();

        let summary = path.step("t1-summary").unwrap();
        let review = summary.find_option("review").unwrap();
        match &review.kind {
            OptionKind::Navigate { target_step_id } => assert_eq!(target_step_id, "t1-intro"),
            other => panic!("expected Navigate, got {:?}", other),
        }
    }

    #[test]
    fn summary_carries_key_points_for_recap() {
        let topic = topic("t1", &["A", "B"]);
        let path = ExplanationEngine::build_path(&topic, ExplanationMode::Diagram).unwrap();

        let summary = path.step("t1-summary").unwrap();
        assert_eq!(
            summary.visual_data,
            VisualData::Summary {
                key_points: vec!["A".to_string(), "B".to_string()]
            }
        );
    }

    #[test]
    fn every_non_summary_step_has_one_interaction_point() {
        let topic = topic("t1", &["A", "B", "C"]);
        let path = ExplanationEngine::build_path(&topic, ExplanationMode::Diagram).unwrap();

        for step in &path.steps {
            assert_eq!(step.interaction_points.len(), 1, "step {}", step.id);
        }

        let intro_options = &path.step("t1-intro").unwrap().interaction_points[0].options;
        assert_eq!(intro_options.len(), 2);

        let key_point_options = &path.step("t1-step-1").unwrap().interaction_points[0].options;
        let ids: Vec<&str> = key_point_options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["continue", "analogy", "technical"]);
    }

    #[test]
    fn empty_key_points_are_rejected() {
        let topic = topic("t1", &[]);
        let result = ExplanationEngine::build_path(&topic, ExplanationMode::Diagram);
        assert!(matches!(result, Err(EngineError::EmptyKeyPoints(id)) if id == "t1"));
    }

    #[test]
    fn analyze_approaches_offers_technical_only_for_detailed_topics() {
        let short = topic("t1", &["A", "B", "C"]);
        let approaches = ExplanationEngine::analyze_approaches(&short);
        assert_eq!(
            approaches,
            vec![
                ExplanationMode::Diagram,
                ExplanationMode::Analogy,
                ExplanationMode::Practical
            ]
        );

        let detailed = topic("t2", &["A", "B", "C", "D"]);
        let approaches = ExplanationEngine::analyze_approaches(&detailed);
        assert_eq!(
            approaches,
            vec![
                ExplanationMode::Diagram,
                ExplanationMode::Technical,
                ExplanationMode::Analogy,
                ExplanationMode::Practical
            ]
        );
    }

    #[test]
    fn question_branch_echoes_the_question_and_returns_to_origin() {
        let branch = ExplanationEngine::question_branch("t1-step-2", "Why is chlorophyll green?");

        assert!(branch.id.starts_with("t1-step-2-branch-"));
        assert_eq!(branch.content, "Let me explain: Why is chlorophyll green?");
        assert_eq!(branch.next_steps, vec!["t1-step-2"]);
        assert_eq!(
            branch.visual_data,
            VisualData::DynamicAnswer {
                question: "Why is chlorophyll green?".to_string(),
                context_step_id: "t1-step-2".to_string(),
            }
        );

        let back = branch.find_option("back").unwrap();
        match &back.kind {
            OptionKind::Navigate { target_step_id } => assert_eq!(target_step_id, "t1-step-2"),
            other => panic!("expected Navigate, got {:?}", other),
        }
    }
}
