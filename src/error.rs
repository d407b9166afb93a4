//! Error types for loading and extraction.
//!
//! Only structural problems surface here. Incomplete data for a single node,
//! skill or eidolon is absorbed by the extractor and reported as a
//! [`SkipReason`](crate::extract::SkipReason) instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::{CharacterId, DefinitionKind};

/// A definition that must always resolve a given level row does not.
///
/// The upstream table is structurally inconsistent, not merely lagging, so the
/// whole character extraction fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} {id} has no row for level {level} (sub-level {sub_level})")]
pub struct DataIntegrityError {
    pub kind: DefinitionKind,
    pub id: u32,
    pub level: u32,
    pub sub_level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("data integrity: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    #[error("unknown character {0}")]
    UnknownCharacter(CharacterId),

    #[error("invalid progression for character {character}: {reason}")]
    InvalidProgression {
        character: CharacterId,
        reason: String,
    },
}

impl ExtractError {
    /// True when the error comes from inconsistent tables rather than caller input.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::DataIntegrity(_))
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("required table '{table}' not found in {dir}")]
    MissingTable { table: &'static str, dir: PathBuf },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
