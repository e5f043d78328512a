//! Entrypoint for the IntelliLearn terminal explainer.
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment and parsing CLI arguments.
//! 2. Loading the topic catalog (bundled or from a JSON file).
//! 3. Building an explanation path for the chosen topic and mode.
//! 4. Driving the interactive step-by-step walkthrough on stdin/stdout.

mod config;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;

use config::Config;
use intellilearn_core::{
    ExplanationEngine, ExplanationMode, ExplanationSession, Outcome, StaticCatalog, Topic,
    TopicCatalog,
};
use render::{ReplCommand, parse_line, render_prompt, render_step};

#[derive(Parser, Debug)]
#[command(
    name = "intellilearn",
    version,
    about = "Adaptive step-by-step explanations in the terminal"
)]
struct Args {
    /// Topic id to explain; prompts for one when omitted
    topic: Option<String>,

    /// Explanation mode: diagram, analogy, technical, or practical
    #[arg(short, long)]
    mode: Option<String>,

    /// JSON topic catalog to load instead of the bundled one
    #[arg(long)]
    topics: Option<std::path::PathBuf>,

    /// List available topics and exit
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let catalog = match args.topics.clone().or(config.topics_path.clone()) {
        Some(path) => StaticCatalog::from_file(&path)
            .with_context(|| format!("Failed to load topic catalog from '{}'", path.display()))?,
        None => StaticCatalog::builtin(),
    };

    if args.list {
        print_topics(&catalog);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let topic = match &args.topic {
        Some(id) => catalog.get(id).ok_or_else(|| {
            anyhow::anyhow!(
                "topic '{}' not found; available topics: {}",
                id,
                available_ids(&catalog)
            )
        })?,
        None => pick_topic(&catalog, &mut lines)?,
    };

    let mode = args
        .mode
        .as_deref()
        .map(ExplanationMode::parse_or_default)
        .unwrap_or(ExplanationMode::Diagram);

    info!(topic = %topic.id, %mode, "starting explanation session");
    let path = ExplanationEngine::build_path(&topic, mode)?;
    let mut session = ExplanationSession::new(path);

    loop {
        let Some(step) = session.current_step().cloned() else {
            bail!("session lost track of its current step");
        };
        let visual = session.effective_visual().unwrap_or(step.visual_type);

        println!();
        print!("{}", render_step(&step, visual, session.progress()));
        println!();
        print!("{}", render_prompt(&step));
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let Some(command) = parse_line(&line?, &step) else {
            continue;
        };

        match command {
            ReplCommand::Quit => break,
            ReplCommand::Input(input) => match session.select(input) {
                Outcome::Moved { .. } | Outcome::Branched { .. } => {}
                Outcome::Stayed => {
                    if step.is_terminal() {
                        println!();
                        println!(
                            "You've reached the end. Pick 'review' to walk through it again, or q to quit."
                        );
                    }
                }
                Outcome::VisualChanged(visual) => {
                    println!();
                    println!("Switching to the {} view.", visual);
                }
                Outcome::ModeRequested(mode) => {
                    println!();
                    println!("Mode '{}' noted for the next walkthrough.", mode);
                }
                Outcome::Signaled(_) => {
                    println!();
                    println!("There's no deeper material for this step yet.");
                }
            },
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Prints the catalog with the approaches suited to each topic.
fn print_topics(catalog: &StaticCatalog) {
    println!("Available topics:");
    for topic in catalog.all() {
        let approaches: Vec<String> = ExplanationEngine::analyze_approaches(&topic)
            .iter()
            .map(|m| m.to_string())
            .collect();
        println!("  {:<16} {}", topic.id, topic.title);
        println!("  {:<16} modes: {}", "", approaches.join(", "));
    }
}

fn available_ids(catalog: &StaticCatalog) -> String {
    catalog
        .all()
        .iter()
        .map(|t| t.id.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Interactive topic selection over stdin.
fn pick_topic(
    catalog: &StaticCatalog,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Topic> {
    let topics = catalog.all();
    println!("Choose a topic to explore:");
    for (index, topic) in topics.iter().enumerate() {
        println!("  {}) {} — {}", index + 1, topic.title, topic.description);
    }

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            bail!("no topic selected");
        };
        let line = line?;
        let trimmed = line.trim();

        if let Ok(number) = trimmed.parse::<usize>() {
            if (1..=topics.len()).contains(&number) {
                return Ok(topics[number - 1].clone());
            }
        }
        if let Some(topic) = catalog.get(trimmed) {
            return Ok(topic);
        }
        println!("Pick a number between 1 and {}, or a topic id.", topics.len());
    }
}
