//! Load raw tables and text maps from a data directory.
//!
//! Layout: `<dir>/<table>.json` (or `.yaml` / `.yml`) holding an array of
//! records for each of `characters`, `skills`, `trace_nodes`, `eidolons` and
//! `properties`, plus `<dir>/text/<lang>.json|yaml` mapping hash to string.
//! Only `characters` is required; other tables default to empty.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::data::property::StatPropertyDef;
use crate::data::tables::{CharacterDef, EidolonDef, GameTables, SkillDef, TraceNodeDef};
use crate::data::text::{Language, TextHash, TextMap};
use crate::error::LoadError;

pub const CHARACTERS_TABLE: &str = "characters";
pub const SKILLS_TABLE: &str = "skills";
pub const TRACE_NODES_TABLE: &str = "trace_nodes";
pub const EIDOLONS_TABLE: &str = "eidolons";
pub const PROPERTIES_TABLE: &str = "properties";
pub const TEXT_DIR: &str = "text";

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Find `<dir>/<stem>.{json,yaml,yml}`, first match wins.
fn find_table_file(dir: &Path, stem: &str) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
}

/// Parse a file as JSON or YAML depending on its extension.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    if is_yaml {
        serde_yaml::from_str(&raw).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(&raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn read_table<T: DeserializeOwned>(dir: &Path, stem: &str) -> Result<Option<Vec<T>>, LoadError> {
    match find_table_file(dir, stem) {
        Some(path) => {
            let records: Vec<T> = read_document(&path)?;
            debug!(table = stem, records = records.len(), path = %path.display(), "loaded table");
            Ok(Some(records))
        }
        None => Ok(None),
    }
}

fn index_by<T, K, F>(records: Vec<T>, table: &str, key: F) -> HashMap<K, T>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
    F: Fn(&T) -> K,
{
    let mut indexed = HashMap::with_capacity(records.len());
    for record in records {
        let id = key(&record);
        if indexed.contains_key(&id) {
            warn!(table, %id, "duplicate id; keeping the later record");
        }
        indexed.insert(id, record);
    }
    indexed
}

/// Load every table under `dir` into a [GameTables] arena.
pub fn load_tables(dir: impl AsRef<Path>) -> Result<GameTables, LoadError> {
    let dir = dir.as_ref();

    let characters: Vec<CharacterDef> =
        read_table(dir, CHARACTERS_TABLE)?.ok_or_else(|| LoadError::MissingTable {
            table: CHARACTERS_TABLE,
            dir: dir.to_path_buf(),
        })?;
    let skills: Vec<SkillDef> = read_table(dir, SKILLS_TABLE)?.unwrap_or_default();
    let trace_nodes: Vec<TraceNodeDef> = read_table(dir, TRACE_NODES_TABLE)?.unwrap_or_default();
    let eidolons: Vec<EidolonDef> = read_table(dir, EIDOLONS_TABLE)?.unwrap_or_default();
    let properties: Vec<StatPropertyDef> = read_table(dir, PROPERTIES_TABLE)?.unwrap_or_default();

    let tables = GameTables {
        characters: index_by(characters, CHARACTERS_TABLE, |c| c.id),
        skills: index_by(skills, SKILLS_TABLE, |s| s.id),
        trace_nodes: index_by(trace_nodes, TRACE_NODES_TABLE, |n| n.id),
        eidolons: index_by(eidolons, EIDOLONS_TABLE, |e| e.id),
        properties: index_by(properties, PROPERTIES_TABLE, |p| p.property.clone()),
    };

    info!(
        dir = %dir.display(),
        characters = tables.characters.len(),
        skills = tables.skills.len(),
        trace_nodes = tables.trace_nodes.len(),
        eidolons = tables.eidolons.len(),
        properties = tables.properties.len(),
        "tables loaded"
    );
    Ok(tables)
}

/// Load `<dir>/text/<lang>.*` for every language that has a file. A missing
/// text directory yields an empty map.
pub fn load_text_map(dir: impl AsRef<Path>) -> Result<TextMap, LoadError> {
    let text_dir = dir.as_ref().join(TEXT_DIR);
    let mut texts = TextMap::new();
    if !text_dir.is_dir() {
        debug!(
            dir = %text_dir.display(),
            "no text directory; localization will fall back to empty strings"
        );
        return Ok(texts);
    }
    for language in Language::ALL {
        if let Some(path) = find_table_file(&text_dir, language.as_str()) {
            let entries: HashMap<TextHash, String> = read_document(&path)?;
            debug!(%language, entries = entries.len(), "loaded text map");
            texts.insert_language(language, entries);
        }
    }
    Ok(texts)
}
