pub mod catalog;
pub mod engine;
pub mod path;
pub mod session;
pub mod step;
pub mod topic;

pub use catalog::{CatalogError, StaticCatalog, TopicCatalog};
pub use engine::{EngineError, ExplanationEngine};
pub use path::{ExplanationPath, UserInteraction};
pub use session::{ExplanationSession, LearnerInput, Outcome, Progress};
pub use step::{
    ExplanationStep, InteractionKind, InteractionOption, InteractionPoint, OptionAction,
    OptionKind, VisualData, VisualizationType,
};
pub use topic::{ExplanationMode, ParseModeError, Topic};
