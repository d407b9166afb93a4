//! Hook for items the extractor leaves out.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::data::{CharacterId, DefinitionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Skills,
    Traces,
    Eidolons,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Traces => "traces",
            Self::Eidolons => "eidolons",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a single item was dropped. None of these stop the extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingDefinition { kind: DefinitionKind, id: u32 },
    LevelNotFound { level: u32 },
    UnrecognizedKind { tag: String },
    NoPayload,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDefinition { kind, id } => write!(f, "{kind} {id} is not in the tables"),
            Self::LevelNotFound { level } => write!(f, "no row for level {level}"),
            Self::UnrecognizedKind { tag } => write!(f, "unrecognized kind '{tag}'"),
            Self::NoPayload => write!(f, "row carries neither a stat nor a skill upgrade"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub character: CharacterId,
    pub section: Section,
    /// Id of the node, skill or eidolon being extracted.
    pub item: u32,
    pub reason: SkipReason,
}

pub trait ExtractObserver: Sync {
    fn skipped(&self, event: &Skipped);
}

impl<F> ExtractObserver for F
where
    F: Fn(&Skipped) + Sync,
{
    fn skipped(&self, event: &Skipped) {
        self(event)
    }
}

/// Default observer: one `warn` line per skipped item.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractObserver for TracingObserver {
    fn skipped(&self, event: &Skipped) {
        warn!(
            character = event.character,
            section = %event.section,
            item = event.item,
            reason = %event.reason,
            "skipped item"
        );
    }
}
