use glam::Vec2;
use thiserror::Error;

use crate::config::{GuideConfig, ObjectiveDef};

/// Errors raised while building an objective sequence.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("duplicate objective id `{0}`")]
    DuplicateId(String),
}

/// A single objective in the progression sequence.
#[derive(Debug, Clone)]
pub struct Objective {
    /// Unique identifier.
    pub id: String,
    /// Anchor point as a fraction of the viewport.
    pub anchor: Vec2,
    /// Pixel offset from the anchor.
    pub offset: Vec2,
}

impl From<&ObjectiveDef> for Objective {
    fn from(def: &ObjectiveDef) -> Self {
        Self {
            id: def.id.clone(),
            anchor: Vec2::from_array(def.anchor),
            offset: Vec2::from_array(def.offset),
        }
    }
}

/// The fixed, ordered list of objectives for a level.
/// Immutable after construction; the index into this list is the step.
#[derive(Debug, Clone)]
pub struct ObjectiveSequence {
    objectives: Vec<Objective>,
}

impl ObjectiveSequence {
    /// Build a sequence, rejecting duplicate ids.
    pub fn new(objectives: Vec<Objective>) -> Result<Self, SequenceError> {
        for (i, obj) in objectives.iter().enumerate() {
            if objectives[..i].iter().any(|o| o.id == obj.id) {
                return Err(SequenceError::DuplicateId(obj.id.clone()));
            }
        }
        Ok(Self { objectives })
    }

    /// Build a sequence from a parsed config.
    pub fn from_config(config: &GuideConfig) -> Result<Self, SequenceError> {
        Self::new(config.objectives.iter().map(Objective::from).collect())
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    /// Whether the sequence has no objectives.
    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// The objective at `index`.
    pub fn get(&self, index: usize) -> Option<&Objective> {
        self.objectives.get(index)
    }

    /// The id at `index`.
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.objectives.get(index).map(|o| o.id.as_str())
    }

    /// The sequence index of an objective id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.objectives.iter().position(|o| o.id == id)
    }

    /// Screen position of the objective at `index` for a given viewport
    /// size: `anchor * viewport + offset`.
    pub fn position_of(&self, index: usize, viewport: Vec2) -> Option<Vec2> {
        self.objectives
            .get(index)
            .map(|o| o.anchor * viewport + o.offset)
    }

    /// Iterate over the objectives in order.
    pub fn iter(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.iter()
    }
}
