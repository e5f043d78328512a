//! Explanation session traversal.
//!
//! Owns one explanation path and applies the navigation contract on behalf
//! of the rendering collaborator: direct navigation, default-continue flow,
//! mode signals, and free-text question branches. Every selection is
//! appended to the path's interaction log, whatever its outcome.

use chrono::Utc;
use tracing::warn;

use crate::engine::ExplanationEngine;
use crate::path::{ExplanationPath, UserInteraction};
use crate::step::{ExplanationStep, OptionAction, OptionKind, VisualizationType};
use crate::topic::ExplanationMode;

/// What the learner did, already decoded by the rendering layer.
///
/// Free text is structurally distinct from an option selection, so the
/// dispatch below never has to sniff id prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearnerInput {
    /// An option on the current step, by id.
    Choice(String),
    /// A free-text question typed into a question prompt.
    Question(String),
}

/// The effect of one learner input, surfaced as data for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The session moved to another step.
    Moved { to: String },
    /// Nothing changed: terminal continue, missing target, or unknown option.
    Stayed,
    /// The current step should be re-rendered with a different visualization.
    VisualChanged(VisualizationType),
    /// The learner asked for a different explanation mode.
    ModeRequested(ExplanationMode),
    /// A symbolic action for the renderer to act on (e.g. "deeper").
    Signaled(OptionAction),
    /// A question branch was synthesized and made current.
    Branched { step_id: String },
}

/// Position indicator for the renderer's progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based count of steps seen so far, including the current one.
    pub position: usize,
    /// Total steps in the fixed path (branch steps excluded).
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.position as f32 / self.total as f32).min(1.0)
    }
}

/// Live traversal state for one learner and one path.
#[derive(Debug, Clone)]
pub struct ExplanationSession {
    path: ExplanationPath,
    /// Question-branch steps spliced in alongside the fixed path steps.
    branch_steps: Vec<ExplanationStep>,
    visual_override: Option<VisualizationType>,
}

impl ExplanationSession {
    pub fn new(path: ExplanationPath) -> Self {
        Self {
            path,
            branch_steps: Vec::new(),
            visual_override: None,
        }
    }

    pub fn path(&self) -> &ExplanationPath {
        &self.path
    }

    /// Resolves the current step over both path steps and branch steps.
    pub fn current_step(&self) -> Option<&ExplanationStep> {
        self.find_step(&self.path.current_step_id)
    }

    /// The visualization the renderer should use for the current step:
    /// a signal-driven override if one is active, else the step's own tag.
    pub fn effective_visual(&self) -> Option<VisualizationType> {
        self.visual_override
            .or_else(|| self.current_step().map(|s| s.visual_type))
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: self.path.visited_step_ids.len() + 1,
            total: self.path.steps.len(),
        }
    }

    /// Applies one learner input and reports its effect.
    pub fn select(&mut self, input: LearnerInput) -> Outcome {
        match input {
            LearnerInput::Choice(option_id) => self.select_option(&option_id),
            LearnerInput::Question(text) => self.ask_question(&text),
        }
    }

    fn select_option(&mut self, option_id: &str) -> Outcome {
        let step_id = self.path.current_step_id.clone();
        let kind = self
            .find_step(&step_id)
            .and_then(|s| s.find_option(option_id))
            .map(|o| o.kind.clone());

        let selected_mode = match &kind {
            Some(OptionKind::SwitchMode { mode }) => Some(*mode),
            _ => None,
        };
        self.record(&step_id, option_id, selected_mode, None);

        let Some(kind) = kind else {
            warn!(step = %step_id, option = %option_id, "option not found on current step");
            return Outcome::Stayed;
        };

        match kind {
            OptionKind::Navigate { target_step_id } => self.move_to(&target_step_id),
            OptionKind::Signal { action } => match action {
                OptionAction::Continue => self.continue_from(&step_id),
                OptionAction::Analogy => {
                    self.visual_override = Some(VisualizationType::AnimatedAnalogy);
                    Outcome::VisualChanged(VisualizationType::AnimatedAnalogy)
                }
                OptionAction::Example => {
                    self.visual_override = Some(VisualizationType::ContextualExample);
                    Outcome::VisualChanged(VisualizationType::ContextualExample)
                }
                OptionAction::Deeper => Outcome::Signaled(OptionAction::Deeper),
            },
            OptionKind::SwitchMode { mode } => Outcome::ModeRequested(mode),
        }
    }

    fn ask_question(&mut self, text: &str) -> Outcome {
        let step_id = self.path.current_step_id.clone();
        self.record(
            &step_id,
            &format!("custom-{}", text),
            None,
            Some(text.to_string()),
        );

        let branch = ExplanationEngine::question_branch(&step_id, text);
        let branch_id = branch.id.clone();
        self.branch_steps.push(branch);

        self.path.visited_step_ids.push(step_id);
        self.path.current_step_id = branch_id.clone();
        Outcome::Branched { step_id: branch_id }
    }

    fn continue_from(&mut self, step_id: &str) -> Outcome {
        let next = self
            .find_step(step_id)
            .and_then(|s| s.next_steps.first().cloned());
        match next {
            Some(next_id) => self.move_to(&next_id),
            // Terminal step: continue goes nowhere.
            None => Outcome::Stayed,
        }
    }

    fn move_to(&mut self, target_step_id: &str) -> Outcome {
        if self.find_step(target_step_id).is_none() {
            warn!(target = %target_step_id, "navigation target does not exist, staying put");
            return Outcome::Stayed;
        }
        let previous = std::mem::replace(
            &mut self.path.current_step_id,
            target_step_id.to_string(),
        );
        self.path.visited_step_ids.push(previous);
        Outcome::Moved {
            to: target_step_id.to_string(),
        }
    }

    fn find_step(&self, id: &str) -> Option<&ExplanationStep> {
        self.path
            .step(id)
            .or_else(|| self.branch_steps.iter().find(|s| s.id == id))
    }

    fn record(
        &mut self,
        step_id: &str,
        option_id: &str,
        selected_mode: Option<ExplanationMode>,
        user_question: Option<String>,
    ) {
        self.path.user_interactions.push(UserInteraction {
            timestamp: Utc::now(),
            step_id: step_id.to_string(),
            option_id: option_id.to_string(),
            selected_mode,
            user_question,
        });
    }
}
