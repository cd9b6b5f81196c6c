use guidepost::{GuideConfig, ObjectiveDef};

/// The airport level's objective sequence. Order matters: the guide walks
/// the player through the NPCs one at a time, stock broker first.
///
/// Anchors are fractions of the viewport matching where the level places
/// each NPC; offsets float the marker above the NPC's head (the two desk
/// NPCs sit lower, so their marker drops below the anchor instead).
pub fn airport_config() -> GuideConfig {
    GuideConfig {
        objectives: vec![
            objective("Stock-NPC", [0.17, 0.80], [0.0, -60.0]),
            objective("Casino-NPC", [0.15, 0.25], [0.0, -60.0]),
            objective("Fidelity", [0.38, 0.15], [0.0, 20.0]),
            objective("Schwab", [0.48, 0.15], [0.0, 20.0]),
            objective("Crypto-NPC", [0.69, 0.24], [0.0, -60.0]),
            objective("Bank-NPC", [0.70, 0.75], [0.0, -60.0]),
            objective("Market Computer", [0.90, 0.65], [0.0, -60.0]),
        ],
        flag_ttl_days: 30,
    }
}

fn objective(id: &str, anchor: [f32; 2], offset: [f32; 2]) -> ObjectiveDef {
    ObjectiveDef {
        id: id.to_string(),
        anchor,
        offset,
    }
}
