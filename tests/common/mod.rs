//! Shared on-disk fixture: a small data directory with one complete character
//! (March 7th, 1001), one character whose skill table is missing its level-1
//! row (1002) and an English/Japanese text map.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;
use trailblaze::data::{
    CharacterDef, EidolonDef, GameTables, Language, SkillDef, StatPropertyDef, TextMap,
    TraceNodeDef,
};
use trailblaze::DataRegistry;

pub const MARCH: u32 = 1001;
pub const BROKEN: u32 = 1002;

pub const TECHNIQUE_NODE: u32 = 1001007;
pub const ATK_NODE: u32 = 1001101;
pub const HP_NODE: u32 = 1001102;
pub const PURIFY_NODE: u32 = 1001201;
pub const REINFORCE_NODE: u32 = 1001202;
pub const EMPTY_NODE: u32 = 1001301;
pub const MISSING_NODE: u32 = 1001999;

fn promotions(max_levels: &[u32]) -> Value {
    Value::Array(
        max_levels
            .iter()
            .enumerate()
            .map(|(promotion, max_level)| {
                json!({
                    "promotion": promotion,
                    "max_level": max_level,
                    "hp": {"base": 144.0 + 57.6 * promotion as f64, "step": 7.2},
                    "atk": {"base": 69.6 + 27.84 * promotion as f64, "step": 3.48},
                    "def": {"base": 78.0 + 31.2 * promotion as f64, "step": 3.9},
                    "spd": 101.0,
                    "crit_rate": 0.05,
                    "crit_dmg": 0.5,
                    "aggro": 150.0
                })
            })
            .collect(),
    )
}

fn skill_levels(levels: &[u32], base: f64) -> Value {
    Value::Array(
        levels
            .iter()
            .map(|&level| json!({"level": level, "params": [base + 0.1 * f64::from(level - 1)]}))
            .collect(),
    )
}

pub fn characters() -> Value {
    json!([
        {
            "id": MARCH,
            "name": 10,
            "rarity": 4,
            "path": "Preservation",
            "element": "Ice",
            "skills": [100101, 100102, 100103, 100104, 100107, 100109],
            "trace_nodes": [
                1001001, 1001002, ATK_NODE, TECHNIQUE_NODE, 1001003, HP_NODE,
                PURIFY_NODE, REINFORCE_NODE, EMPTY_NODE, MISSING_NODE, 1001109
            ],
            "eidolons": [100103, 100101, 100106, 100102, 100105, 100104],
            "promotions": promotions(&[20, 30, 40, 50, 60, 70, 80])
        },
        {
            "id": BROKEN,
            "name": 11,
            "rarity": 4,
            "path": "Destruction",
            "element": "Physical",
            "skills": [100201],
            "trace_nodes": [1002001],
            "promotions": promotions(&[20])
        }
    ])
}

pub fn skills() -> Value {
    json!([
        {"id": 100101, "name": 100, "kind": "Normal", "effect": "SingleAttack",
         "description": {"dynamic": 101}, "levels": skill_levels(&[1, 2, 3, 4, 5, 6], 0.5)},
        {"id": 100102, "name": 102, "kind": "BPSkill", "effect": "Defence",
         "description": {"dynamic": 103}, "simple_description": 104,
         "levels": skill_levels(&[10, 3, 1, 2, 5, 4, 6, 8, 9], 0.38)},
        {"id": 100103, "name": 105, "kind": "Ultra", "effect": "AoEAttack",
         "description": {"dynamic": 106}, "levels": skill_levels(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 0.9)},
        {"id": 100104, "name": 107, "kind": "Talent", "effect": "Support",
         "description": {"dynamic": 108}, "levels": skill_levels(&[1], 0.2)},
        {"id": 100107, "name": 109, "kind": "Maze", "effect": "Impair",
         "description": 110, "levels": [{"level": 1, "params": [3.0]}]},
        {"id": 100109, "name": 111, "kind": "MazeNormal", "effect": "SingleAttack",
         "description": 112, "levels": [{"level": 1}]},
        {"id": 100201, "name": 113, "kind": "Normal", "effect": "SingleAttack",
         "description": 114, "levels": skill_levels(&[2, 3], 0.5)}
    ])
}

pub fn trace_nodes() -> Value {
    json!([
        {"id": 1001001, "anchor": "Point01", "max_level": 6, "base_skill": 100101},
        {"id": 1001002, "anchor": "Point02", "max_level": 10, "base_skill": 100102},
        {"id": 1001003, "anchor": "Point03", "max_level": 10, "base_skill": 100103},
        {"id": 1001109, "anchor": "Point05", "max_level": 1, "base_skill": 100109},
        {"id": TECHNIQUE_NODE, "anchor": "Point07", "max_level": 1, "base_skill": 100107,
         "levels": [{"level": 1, "detail": {"stat": {"property": "AttackAddedRatio", "value": 0.5}}}]},
        {"id": ATK_NODE, "anchor": "Point09", "max_level": 1,
         "unlock": {"ascension": 2},
         "levels": [{"level": 1, "detail": {"stat": {"property": "AttackAddedRatio", "value": 0.08}}}]},
        {"id": HP_NODE, "anchor": "Point10", "max_level": 1, "prerequisites": [PURIFY_NODE],
         "levels": [{"level": 1,
                     "stats": [{"property": "HPAddedRatio", "value": 0.1}],
                     "detail": {"stat": {"property": "HPAddedRatio", "value": 0.1}}}]},
        {"id": PURIFY_NODE, "anchor": "Point06", "max_level": 1,
         "unlock": {"ascension": 2, "level": 30},
         "levels": [{"level": 1, "name": 200, "params": [0.3],
                     "detail": {"effect": "Purify", "description": {"dynamic": 201}}}]},
        {"id": REINFORCE_NODE, "anchor": "Point07", "max_level": 1,
         "unlock": {"ascension": 4},
         "levels": [{"level": 1, "name": 202, "description": 203,
                     "stats": [{"property": "DefenceAddedRatio", "value": 0.05}],
                     "detail": {"effect": "Reinforce", "skill": {"id": 100104}}}]},
        {"id": EMPTY_NODE, "anchor": "Point11", "max_level": 1, "levels": [{"level": 1}]},
        {"id": 1002001, "anchor": "Point01", "max_level": 3, "base_skill": 100201}
    ])
}

pub fn eidolons() -> Value {
    json!([
        {"id": 100101, "rank": 1, "name": 300, "description": {"dynamic": 301}, "params": [50, 2]},
        {"id": 100102, "rank": 2, "name": 302, "description": 303},
        {"id": 100103, "rank": 3, "name": 304, "description": 305,
         "skill_upgrades": [{"skill": 100103, "amount": 2}, {"skill": 100101, "amount": 1}]},
        {"id": 100104, "rank": 4, "name": 306, "description": 307},
        {"id": 100105, "rank": 5, "name": 308, "description": 309,
         "skill_upgrades": [{"skill": 100102, "amount": 2}, {"skill": 999, "amount": 1}]},
        {"id": 100106, "rank": 6, "name": 310, "description": 311}
    ])
}

pub fn properties() -> Value {
    json!([
        {"property": "AttackAddedRatio", "kind": "ATK", "percent": true},
        {"property": "HPAddedRatio", "kind": "HP", "percent": true},
        {"property": "DefenceAddedRatio", "kind": "DEF", "percent": true}
    ])
}

pub fn english() -> Value {
    json!({
        "10": "March 7th",
        "11": "Broken Bot",
        "100": "Frigid Cold Arrow",
        "101": "Deals Ice DMG equal to #1[i]% of March 7th's ATK to a single enemy.",
        "102": "The Power of Cuteness",
        "103": "Provides a Shield equal to #1[i]% of March 7th's DEF.",
        "104": "Gains a Shield.",
        "105": "Glacial Cascade",
        "106": "Deals Ice DMG equal to #1[i]% of ATK to all enemies.",
        "107": "Girl Power",
        "108": "Counters with DMG equal to #1[i]% of ATK.",
        "109": "Freezing Beauty",
        "110": "Freezes a random enemy.",
        "111": "Mystery Strike",
        "112": "Unknown.",
        "200": "Purify",
        "201": "Removes a debuff with #1[i]% fixed chance.",
        "202": "Reinforce",
        "203": "Node text for Reinforce.",
        "300": "Memory of You",
        "301": "Increases DMG by {0}% for {1} turn(s)",
        "302": "Memory of It",
        "303": "Gains a Shield when an ally's HP drops.",
        "304": "Memory of Everything",
        "305": "Ultimate Lv. +2, Basic ATK Lv. +1.",
        "306": "Never Forfeit Again",
        "307": "Counter DMG increases.",
        "308": "Never Forget Her Again",
        "309": "Skill Lv. +2.",
        "310": "Just Like This, Always...",
        "311": "Shielded allies restore HP."
    })
}

pub fn japanese() -> Value {
    json!({
        "10": "三月なのか",
        "100": "極寒の弓矢"
    })
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Write the fixture tables into a fresh temporary directory.
pub fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_json(&root.join("characters.json"), &characters());
    write_json(&root.join("skills.json"), &skills());
    write_json(&root.join("trace_nodes.json"), &trace_nodes());
    write_json(&root.join("eidolons.json"), &eidolons());
    write_json(&root.join("properties.json"), &properties());
    write_json(
        &root.join("version.json"),
        &json!({"data_version": "2.3.51", "source": "fixture"}),
    );
    fs::create_dir(root.join("text")).unwrap();
    write_json(&root.join("text").join("en.json"), &english());
    write_json(&root.join("text").join("jp.json"), &japanese());
    dir
}

pub fn registry() -> (TempDir, Arc<DataRegistry>) {
    let dir = fixture_dir();
    let registry = DataRegistry::load(dir.path()).unwrap();
    (dir, registry)
}

/// The fixture tables built in memory, without touching disk.
pub fn tables() -> GameTables {
    let mut tables = GameTables::new();
    for def in serde_json::from_value::<Vec<CharacterDef>>(characters()).unwrap() {
        tables.insert_character(def);
    }
    for def in serde_json::from_value::<Vec<SkillDef>>(skills()).unwrap() {
        tables.insert_skill(def);
    }
    for def in serde_json::from_value::<Vec<TraceNodeDef>>(trace_nodes()).unwrap() {
        tables.insert_trace_node(def);
    }
    for def in serde_json::from_value::<Vec<EidolonDef>>(eidolons()).unwrap() {
        tables.insert_eidolon(def);
    }
    for def in serde_json::from_value::<Vec<StatPropertyDef>>(properties()).unwrap() {
        tables.insert_property(def);
    }
    tables
}

pub fn texts() -> TextMap {
    let mut texts = TextMap::new();
    for (language, entries) in [(Language::En, english()), (Language::Jp, japanese())] {
        for (hash, text) in entries.as_object().unwrap() {
            texts.insert(language, hash.parse().unwrap(), text.as_str().unwrap());
        }
    }
    texts
}
