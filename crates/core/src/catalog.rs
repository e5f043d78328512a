//! Topic Catalog
//!
//! Read-only source of the topics available for explanation. The catalog is
//! fixed at startup and injected into whatever needs it, which keeps tests
//! free to substitute their own topic sets.

use std::fs;
use std::path::Path;

use crate::topic::Topic;

/// Failure while loading a topic catalog from external data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read topic file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse topic data")]
    Parse(#[from] serde_json::Error),
    #[error("topic catalog is empty")]
    Empty,
}

/// Contract for any read-only source of topics.
///
/// Both operations are total lookups; `get` yields `None` for an unknown id
/// rather than substituting a default, so callers must handle absence
/// explicitly.
#[cfg_attr(test, mockall::automock)]
pub trait TopicCatalog: Send + Sync {
    /// All topics, in catalog order.
    fn all(&self) -> Vec<Topic>;

    /// Looks up a single topic by id.
    fn get(&self, id: &str) -> Option<Topic>;
}

/// An in-memory catalog over a fixed, ordered list of topics.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    topics: Vec<Topic>,
}

impl StaticCatalog {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// The bundled demo catalog: photosynthesis and cell structure.
    pub fn builtin() -> Self {
        Self::new(vec![photosynthesis_topic(), cell_structure_topic()])
    }

    /// Parses a catalog from a JSON array of topics.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let topics: Vec<Topic> = serde_json::from_str(json)?;
        if topics.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self::new(topics))
    }

    /// Loads a catalog from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), topics = catalog.topics.len(), "loaded topic catalog");
        Ok(catalog)
    }
}

impl TopicCatalog for StaticCatalog {
    fn all(&self) -> Vec<Topic> {
        self.topics.clone()
    }

    fn get(&self, id: &str) -> Option<Topic> {
        self.topics.iter().find(|t| t.id == id).cloned()
    }
}

fn photosynthesis_topic() -> Topic {
    Topic::new(
        "photosynthesis",
        "Photosynthesis",
        "Learn how plants convert sunlight into energy through a fascinating natural process.",
        vec![
            "Plants capture sunlight using chlorophyll, the green pigment in their leaves"
                .to_string(),
            "Water from the soil travels up through the plant to the leaves".to_string(),
            "Carbon dioxide (CO₂) from the air enters through tiny pores called stomata"
                .to_string(),
            "Using light energy, water and CO₂ are transformed into glucose (sugar) and oxygen"
                .to_string(),
            "The oxygen is released into the air, while glucose provides energy for the plant to grow"
                .to_string(),
        ],
    )
}

fn cell_structure_topic() -> Topic {
    Topic::new(
        "cell-structure",
        "Cell Structure",
        "Discover the basic building blocks of life and how cells are organized.",
        vec![
            "Cells are the smallest unit of life, like tiny factories working together".to_string(),
            "The cell membrane acts as a protective barrier, controlling what goes in and out"
                .to_string(),
            "The nucleus is the control center, containing DNA with instructions for the cell"
                .to_string(),
            "Mitochondria are the powerhouses, generating energy from nutrients".to_string(),
            "Different organelles work together like departments in a factory".to_string(),
        ],
    )
}
