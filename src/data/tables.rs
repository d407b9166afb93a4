//! Raw static definitions and the id-indexed arena that holds them.
//!
//! Definitions never point at each other directly: every cross-reference is an
//! id resolved through [`GameTables`], so nothing downstream can end up holding
//! a cycle.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::property::{StatAdd, StatPropertyDef};
use crate::data::text::TextHandle;

pub type CharacterId = u32;
pub type SkillId = u32;
pub type TraceId = u32;
pub type EidolonId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    Character,
    Promotion,
    Skill,
    TraceNode,
    Eidolon,
}

impl DefinitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Promotion => "promotion",
            Self::Skill => "skill",
            Self::TraceNode => "trace node",
            Self::Eidolon => "eidolon",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    pub id: CharacterId,
    pub name: TextHandle,
    #[serde(default)]
    pub rarity: u8,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub element: String,
    #[serde(default)]
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub trace_nodes: Vec<TraceId>,
    #[serde(default)]
    pub eidolons: Vec<EidolonId>,
    #[serde(default)]
    pub promotions: Vec<PromotionRow>,
}

/// Linear growth: `base + step * (level - 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatGrowth {
    pub base: f64,
    #[serde(default)]
    pub step: f64,
}

impl StatGrowth {
    pub fn at_level(&self, level: u32) -> f64 {
        self.base + self.step * f64::from(level.saturating_sub(1))
    }
}

/// Stats for one ascension phase of a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionRow {
    pub promotion: u8,
    pub max_level: u32,
    #[serde(default)]
    pub hp: StatGrowth,
    #[serde(default)]
    pub atk: StatGrowth,
    #[serde(default)]
    pub def: StatGrowth,
    #[serde(default)]
    pub spd: f64,
    #[serde(default)]
    pub crit_rate: f64,
    #[serde(default)]
    pub crit_dmg: f64,
    #[serde(default)]
    pub aggro: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: TextHandle,
    /// Raw kind tag (`Normal`, `BPSkill`, `Ultra`, `Talent`, `Maze`, ...).
    pub kind: String,
    #[serde(default)]
    pub effect: String,
    pub description: TextHandle,
    #[serde(default)]
    pub simple_description: Option<TextHandle>,
    #[serde(default)]
    pub levels: Vec<SkillLevelRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillLevelRow {
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub sub_level: u32,
    #[serde(default)]
    pub params: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnlockRequirement {
    #[serde(default)]
    pub ascension: u8,
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceNodeDef {
    pub id: TraceId,
    #[serde(default)]
    pub anchor: String,
    pub max_level: u32,
    #[serde(default)]
    pub base_skill: Option<SkillId>,
    #[serde(default)]
    pub unlock: UnlockRequirement,
    #[serde(default)]
    pub prerequisites: Vec<TraceId>,
    #[serde(default)]
    pub levels: Vec<TraceLevelRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceLevelRow {
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub sub_level: u32,
    #[serde(default)]
    pub name: Option<TextHandle>,
    #[serde(default)]
    pub description: Option<TextHandle>,
    #[serde(default)]
    pub params: Vec<f64>,
    /// Stats surfaced by the row itself, independent of the detail payload.
    #[serde(default)]
    pub stats: Vec<StatAdd>,
    #[serde(default)]
    pub detail: Option<TraceDetail>,
}

/// Row payload, told apart by shape: a `stat` field makes it a stat bonus, an
/// `effect` field makes it a skill upgrade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceDetail {
    StatBonus {
        stat: StatAdd,
    },
    SkillUpgrade {
        effect: String,
        #[serde(default)]
        description: Option<TextHandle>,
        #[serde(default)]
        params: Vec<f64>,
        #[serde(default)]
        skill: Option<SkillRef>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRef {
    pub id: SkillId,
    #[serde(default = "default_skill_ref_level")]
    pub level: u32,
}

fn default_skill_ref_level() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EidolonDef {
    pub id: EidolonId,
    pub rank: u8,
    pub name: TextHandle,
    pub description: TextHandle,
    #[serde(default)]
    pub params: Vec<f64>,
    #[serde(default)]
    pub skill_upgrades: Vec<SkillUpgradeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillUpgradeRef {
    pub skill: SkillId,
    pub amount: u32,
}

/// Arena of every loaded definition, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct GameTables {
    pub characters: HashMap<CharacterId, CharacterDef>,
    pub skills: HashMap<SkillId, SkillDef>,
    pub trace_nodes: HashMap<TraceId, TraceNodeDef>,
    pub eidolons: HashMap<EidolonId, EidolonDef>,
    pub properties: HashMap<String, StatPropertyDef>,
}

impl GameTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn character(&self, id: CharacterId) -> Option<&CharacterDef> {
        self.characters.get(&id)
    }

    pub fn skill(&self, id: SkillId) -> Option<&SkillDef> {
        self.skills.get(&id)
    }

    pub fn trace_node(&self, id: TraceId) -> Option<&TraceNodeDef> {
        self.trace_nodes.get(&id)
    }

    pub fn eidolon(&self, id: EidolonId) -> Option<&EidolonDef> {
        self.eidolons.get(&id)
    }

    pub fn property(&self, name: &str) -> Option<&StatPropertyDef> {
        self.properties.get(name)
    }

    /// Character ids in ascending order.
    pub fn character_ids(&self) -> Vec<CharacterId> {
        let mut ids: Vec<_> = self.characters.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn insert_character(&mut self, def: CharacterDef) {
        self.characters.insert(def.id, def);
    }

    pub fn insert_skill(&mut self, def: SkillDef) {
        self.skills.insert(def.id, def);
    }

    pub fn insert_trace_node(&mut self, def: TraceNodeDef) {
        self.trace_nodes.insert(def.id, def);
    }

    pub fn insert_eidolon(&mut self, def: EidolonDef) {
        self.eidolons.insert(def.id, def);
    }

    pub fn insert_property(&mut self, def: StatPropertyDef) {
        self.properties.insert(def.property.clone(), def);
    }
}
