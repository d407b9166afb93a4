//! Translation tables for raw skill kind and effect tags.
//!
//! Raw tables gain new tags faster than these tables are updated; a tag that
//! is missing here excludes the record instead of failing the extraction.

use crate::data::{GameTables, TraceNodeDef};

/// Raw kind tag of a character's innate technique.
pub const TECHNIQUE_KIND: &str = "Maze";

pub fn skill_kind_label(kind: &str) -> Option<&'static str> {
    match kind {
        "Normal" => Some("Basic ATK"),
        "BPSkill" => Some("Skill"),
        "Ultra" => Some("Ultimate"),
        "Talent" => Some("Talent"),
        TECHNIQUE_KIND => Some("Technique"),
        _ => None,
    }
}

pub fn skill_effect_label(effect: &str) -> Option<&'static str> {
    match effect {
        "SingleAttack" => Some("Single Target"),
        "Blast" => Some("Blast"),
        "AoEAttack" => Some("AoE"),
        "Bounce" => Some("Bounce"),
        "Enhance" => Some("Enhance"),
        "Support" => Some("Support"),
        "Defence" => Some("Defence"),
        "Restore" => Some("Restore"),
        "Impair" => Some("Impair"),
        "Summon" => Some("Summon"),
        _ => None,
    }
}

/// True when the node's base skill is the technique. Detected by kind tag only.
pub fn is_technique_node(node: &TraceNodeDef, tables: &GameTables) -> bool {
    node.base_skill
        .and_then(|id| tables.skill(id))
        .is_some_and(|skill| skill.kind == TECHNIQUE_KIND)
}
