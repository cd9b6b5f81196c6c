use serde::{Deserialize, Serialize};

/// Guide configuration describing a level's objective sequence.
/// Loaded from a JSON file at runtime or built in code by a game crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Ordered objectives. Order defines the progression sequence.
    pub objectives: Vec<ObjectiveDef>,
    /// Flag time-to-live in days (default: 30).
    #[serde(default = "default_ttl_days")]
    pub flag_ttl_days: u32,
}

/// A single objective in the sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveDef {
    /// Unique identifier, e.g. the NPC name ("Bank-NPC").
    pub id: String,
    /// Anchor point as a fraction of the viewport, x and y in [0, 1].
    pub anchor: [f32; 2],
    /// Pixel offset from the anchor (default: 60 px above, clearing the
    /// NPC's head).
    #[serde(default = "default_offset")]
    pub offset: [f32; 2],
}

fn default_ttl_days() -> u32 {
    30
}

fn default_offset() -> [f32; 2] {
    [0.0, -60.0]
}

impl GuideConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
