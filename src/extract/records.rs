//! Export records: owned, flat snapshots with no references back into the
//! definition tables. Safe to serialize or send across threads as-is.

use serde::{Deserialize, Serialize};

use crate::data::{CharacterId, EidolonId, Language, SkillId, TraceId};
use crate::leveled::{BaseStats, Progression, StatBonus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub level: u32,
    pub params: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillData {
    pub id: SkillId,
    pub node_id: TraceId,
    pub name: String,
    pub skill_type: String,
    pub effect: String,
    /// Level-1 description.
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_description: Option<String>,
    pub max_level: u32,
    /// Levels added by eidolons unlocked at the requested rank.
    pub eidolon_bonus: u32,
    /// One entry per level that has data, ascending.
    pub levels: Vec<SkillLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Minor,
    Major,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceData {
    pub id: TraceId,
    pub anchor: String,
    pub kind: TraceKind,
    pub name: String,
    pub description: String,
    pub params: Vec<f64>,
    pub stats: Vec<StatBonus>,
    pub prerequisites: Vec<TraceId>,
    pub unlock_ascension: u8,
    pub unlock_level: u32,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EidolonSkillUpgrade {
    pub skill_id: SkillId,
    pub skill_type: String,
    pub skill_name: String,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EidolonExport {
    pub id: EidolonId,
    pub rank: u8,
    pub name: String,
    pub description: String,
    pub params: Vec<f64>,
    pub unlocked: bool,
    pub skill_upgrades: Vec<EidolonSkillUpgrade>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterExport {
    pub id: CharacterId,
    pub name: String,
    pub language: Language,
    pub rarity: u8,
    pub path: String,
    pub element: String,
    pub progression: Progression,
    pub level_cap: u32,
    pub base_stats: BaseStats,
    pub skills: Vec<SkillData>,
    pub traces: Vec<TraceData>,
    pub eidolons: Vec<EidolonExport>,
    /// Summed stats of unlocked traces.
    pub trace_totals: Vec<StatBonus>,
}
