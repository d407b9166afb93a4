//! Startup-loaded data cache. Load once, share via Arc with the CLI and the
//! batch workers instead of re-reading tables per character.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::data::loader::{load_tables, load_text_map, read_document};
use crate::data::tables::{CharacterId, GameTables};
use crate::data::text::{Language, TextMap};
use crate::error::LoadError;
use crate::leveled::Localizer;

pub const VERSION_FILE: &str = "version.json";

/// Contents of `version.json`: which game build the tables were dumped from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Normalize a character name for lookup: alphanumeric lowercase only.
fn normalize_lookup_key(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Read-only registry of every table and text map under one data directory.
#[derive(Debug)]
pub struct DataRegistry {
    pub tables: GameTables,
    pub texts: TextMap,
    pub version: Option<DataVersion>,
    data_dir: PathBuf,
}

impl DataRegistry {
    pub fn new(tables: GameTables, texts: TextMap) -> Self {
        Self {
            tables,
            texts,
            version: None,
            data_dir: PathBuf::new(),
        }
    }

    /// Load all static data from `dir`. Table failures return Err; a missing
    /// or unreadable `version.json` is allowed (None).
    pub fn load(dir: impl AsRef<Path>) -> Result<Arc<DataRegistry>, LoadError> {
        let dir = dir.as_ref();
        let tables = load_tables(dir)?;
        let texts = load_text_map(dir)?;
        let version = Self::load_version(dir);

        let data_version = version
            .as_ref()
            .and_then(|v| v.data_version.as_deref())
            .unwrap_or("unknown");
        info!(
            dir = %dir.display(),
            languages = texts.languages().count(),
            data_version,
            "data registry ready"
        );

        Ok(Arc::new(DataRegistry {
            tables,
            texts,
            version,
            data_dir: dir.to_path_buf(),
        }))
    }

    fn load_version(dir: &Path) -> Option<DataVersion> {
        let path = dir.join(VERSION_FILE);
        if !path.is_file() {
            return None;
        }
        match read_document(&path) {
            Ok(version) => Some(version),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable version file");
                None
            }
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn data_version(&self) -> Option<&str> {
        self.version.as_ref()?.data_version.as_deref()
    }

    /// Resolve a character by numeric id or by its name in `language`,
    /// ignoring case, spaces and punctuation.
    pub fn find_character(&self, name_or_id: &str, language: Language) -> Option<CharacterId> {
        let trimmed = name_or_id.trim();
        if let Ok(id) = trimmed.parse::<CharacterId>() {
            if self.tables.character(id).is_some() {
                return Some(id);
            }
        }

        let key = normalize_lookup_key(trimmed);
        if key.is_empty() {
            return None;
        }
        self.character_names(language)
            .into_iter()
            .find(|(_, name)| normalize_lookup_key(name) == key)
            .map(|(id, _)| id)
    }

    /// Id and localized name of every character, ascending by id.
    pub fn character_names(&self, language: Language) -> Vec<(CharacterId, String)> {
        let localizer = Localizer::new(&self.texts, language);
        self.tables
            .character_ids()
            .into_iter()
            .filter_map(|id| {
                let def = self.tables.character(id)?;
                Some((id, localizer.text(&def.name)))
            })
            .collect()
    }
}
