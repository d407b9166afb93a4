//! Export manifest: written next to the per-character files by `export`, so a
//! consumer can tell which data version and language produced them and which
//! characters failed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::tables::CharacterId;
use crate::data::text::Language;
use crate::error::ExportError;
use crate::leveled::Progression;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    Ok,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: CharacterId,
    pub status: ExportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    pub language: Language,
    pub progression: Progression,
    pub characters: Vec<ManifestEntry>,
}

impl ExportManifest {
    pub fn new(language: Language, progression: Progression, data_version: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            data_version,
            language,
            progression,
            characters: Vec::new(),
        }
    }

    pub fn record_success(&mut self, id: CharacterId, file: impl Into<String>) {
        self.characters.push(ManifestEntry {
            id,
            status: ExportStatus::Ok,
            file: Some(file.into()),
            error: None,
        });
    }

    pub fn record_failure(&mut self, id: CharacterId, error: impl ToString) {
        self.characters.push(ManifestEntry {
            id,
            status: ExportStatus::Failed,
            file: None,
            error: Some(error.to_string()),
        });
    }

    pub fn succeeded(&self) -> usize {
        self.count(ExportStatus::Ok)
    }

    pub fn failed(&self) -> usize {
        self.count(ExportStatus::Failed)
    }

    fn count(&self, status: ExportStatus) -> usize {
        self.characters
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    }

    /// Write `manifest.json` into `dir` and return its path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(MANIFEST_FILE);
        write_json(&path, self)?;
        Ok(path)
    }
}

/// Pretty-print `value` as JSON into `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let body = serde_json::to_string_pretty(value).map_err(|source| ExportError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, body).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
