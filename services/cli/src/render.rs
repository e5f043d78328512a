//! Terminal rendering of explanation steps.
//!
//! Plays the rendering-collaborator role: turns steps, visual payloads, and
//! interaction prompts into text, and decodes raw learner lines into
//! structured session input. Everything here is a pure function over core
//! types so the interactive loop stays trivially testable.

use std::fmt::Write;

use intellilearn_core::{
    ExplanationStep, InteractionKind, InteractionOption, LearnerInput, Progress, VisualData,
    VisualizationType,
};

/// One decoded line of learner input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Input(LearnerInput),
}

/// Renders a step's header, content, and visualization block.
pub fn render_step(step: &ExplanationStep, visual: VisualizationType, progress: Progress) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "— Step {} of {} —",
        progress.position.min(progress.total),
        progress.total
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", step.content);
    let _ = writeln!(out);
    out.push_str(&render_visual(&step.visual_data, visual));
    out
}

/// Renders the visualization payload as a framed text block.
pub fn render_visual(data: &VisualData, visual: VisualizationType) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", visual);
    match data {
        VisualData::Introduction { topic } => {
            let _ = writeln!(out, "  ◦ Building up: {}", topic);
        }
        VisualData::Concept {
            mode,
            content,
            topic_title,
        } => {
            let _ = writeln!(out, "  ◦ {} ({} view)", topic_title, mode);
            let _ = writeln!(out, "  ◦ {}", content);
        }
        VisualData::Summary { key_points } => {
            for (index, point) in key_points.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", index + 1, point);
            }
        }
        VisualData::DynamicAnswer {
            question,
            context_step_id,
        } => {
            let _ = writeln!(out, "  ◦ Your question: {}", question);
            let _ = writeln!(out, "  ◦ (asked at {})", context_step_id);
        }
    }
    out
}

/// Renders the step's interaction prompt with numbered options.
pub fn render_prompt(step: &ExplanationStep) -> String {
    let mut out = String::new();
    for point in &step.interaction_points {
        let _ = writeln!(out, "{}", point.prompt_text);
        for (index, option) in point.options.iter().enumerate() {
            let _ = writeln!(out, "  {}) {} {}", index + 1, option.icon, option.label);
        }
        if point.kind == InteractionKind::Question {
            let _ = writeln!(out, "  …or type your own question.");
        }
    }
    let _ = writeln!(out, "  (q to quit)");
    out
}

/// Decodes one raw line against the current step's options.
///
/// A number picks the option at that position, an exact id picks it by name,
/// and anything else is treated as a free-text question. Blank lines are
/// ignored.
pub fn parse_line(line: &str, step: &ExplanationStep) -> Option<ReplCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if matches!(trimmed, "q" | "quit" | "exit") {
        return Some(ReplCommand::Quit);
    }

    let options: Vec<&InteractionOption> = step
        .interaction_points
        .iter()
        .flat_map(|p| p.options.iter())
        .collect();

    if let Ok(number) = trimmed.parse::<usize>() {
        if (1..=options.len()).contains(&number) {
            return Some(ReplCommand::Input(LearnerInput::Choice(
                options[number - 1].id.clone(),
            )));
        }
    }

    if let Some(option) = options.iter().find(|o| o.id == trimmed) {
        return Some(ReplCommand::Input(LearnerInput::Choice(option.id.clone())));
    }

    Some(ReplCommand::Input(LearnerInput::Question(
        trimmed.to_string(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use intellilearn_core::{ExplanationEngine, ExplanationMode, Topic};

    fn first_step() -> ExplanationStep {
        let topic = Topic::new(
            "t1",
            "Test Topic",
            "A topic for testing.",
            vec!["A".to_string()],
        );
        let path = ExplanationEngine::build_path(&topic, ExplanationMode::Diagram).unwrap();
        path.steps[0].clone()
    }

    #[test]
    fn number_selects_an_option_by_position() {
        let step = first_step();
        let command = parse_line("2", &step).unwrap();
        assert_eq!(
            command,
            ReplCommand::Input(LearnerInput::Choice("change-mode".to_string()))
        );
    }

    #[test]
    fn exact_id_selects_an_option_by_name() {
        let step = first_step();
        let command = parse_line("continue", &step).unwrap();
        assert_eq!(
            command,
            ReplCommand::Input(LearnerInput::Choice("continue".to_string()))
        );
    }

    #[test]
    fn free_text_becomes_a_question() {
        let step = first_step();
        let command = parse_line("what is chlorophyll?", &step).unwrap();
        assert_eq!(
            command,
            ReplCommand::Input(LearnerInput::Question("what is chlorophyll?".to_string()))
        );
    }

    #[test]
    fn quit_words_and_blank_lines_are_handled() {
        let step = first_step();
        assert_eq!(parse_line("q", &step), Some(ReplCommand::Quit));
        assert_eq!(parse_line("quit", &step), Some(ReplCommand::Quit));
        assert_eq!(parse_line("   ", &step), None);
    }

    #[test]
    fn prompt_lists_options_with_positions() {
        let step = first_step();
        let prompt = render_prompt(&step);
        assert!(prompt.contains("Ready to begin?"));
        assert!(prompt.contains("1) ✅ Let's go!"));
        assert!(prompt.contains("2) 🔄 Show me differently"));
    }

    #[test]
    fn summary_visual_lists_key_points() {
        let data = VisualData::Summary {
            key_points: vec!["A".to_string(), "B".to_string()],
        };
        let text = render_visual(&data, VisualizationType::ContextualExample);
        assert!(text.contains("[contextual-example]"));
        assert!(text.contains("1. A"));
        assert!(text.contains("2. B"));
    }
}
