//! Level-row selection.
//!
//! Rows are matched exactly on `(level, sub_level)`; there is no interpolation.
//! A row with level `0` is a levelless fixed row, and a definition whose only
//! row is levelless answers every requested level with it.

use crate::data::{DefinitionKind, PromotionRow, SkillLevelRow, TraceLevelRow};
use crate::error::DataIntegrityError;

/// Marker level for a fixed row that applies at every level.
pub const LEVELLESS: u32 = 0;

pub trait LevelRow {
    fn level(&self) -> u32;

    fn sub_level(&self) -> u32 {
        0
    }
}

impl LevelRow for SkillLevelRow {
    fn level(&self) -> u32 {
        self.level
    }

    fn sub_level(&self) -> u32 {
        self.sub_level
    }
}

impl LevelRow for TraceLevelRow {
    fn level(&self) -> u32 {
        self.level
    }

    fn sub_level(&self) -> u32 {
        self.sub_level
    }
}

/// Promotion rows are addressed 1-based: ascension phase `n` is level `n + 1`.
impl LevelRow for PromotionRow {
    fn level(&self) -> u32 {
        u32::from(self.promotion) + 1
    }
}

/// Requested position in a definition's level rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelQuery {
    pub level: u32,
    pub sub_level: u32,
}

impl LevelQuery {
    pub const fn new(level: u32) -> Self {
        Self { level, sub_level: 0 }
    }

    pub const fn with_sub_level(level: u32, sub_level: u32) -> Self {
        Self { level, sub_level }
    }
}

/// What a caller does when no row matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPolicy {
    /// Absence is expected (e.g. a node without data at this level); skip it.
    Optional,
    /// Absence means the table is structurally broken.
    Required,
}

/// True when the definition has a single levelless row.
pub fn is_levelless<R: LevelRow>(rows: &[R]) -> bool {
    matches!(rows, [only] if only.level() == LEVELLESS)
}

/// Select the row matching `query`, or `None` when the definition has no such row.
pub fn select_row<R: LevelRow>(rows: &[R], query: LevelQuery) -> Option<&R> {
    if is_levelless(rows) {
        return rows.first();
    }
    if query.level == 0 {
        return None;
    }
    rows.iter()
        .find(|row| row.level() == query.level && row.sub_level() == query.sub_level)
}

/// [select_row] with the caller's policy applied: `Ok(None)` for an optional
/// miss, an integrity error for a required one.
pub fn select_row_with_policy<'a, R: LevelRow>(
    rows: &'a [R],
    query: LevelQuery,
    policy: LevelPolicy,
    kind: DefinitionKind,
    id: u32,
) -> Result<Option<&'a R>, DataIntegrityError> {
    match (select_row(rows, query), policy) {
        (Some(row), _) => Ok(Some(row)),
        (None, LevelPolicy::Optional) => Ok(None),
        (None, LevelPolicy::Required) => Err(DataIntegrityError {
            kind,
            id,
            level: query.level,
            sub_level: query.sub_level,
        }),
    }
}

/// Highest level present in `rows` (`0` for an empty or levelless table).
pub fn max_level<R: LevelRow>(rows: &[R]) -> u32 {
    rows.iter().map(LevelRow::level).max().unwrap_or(0)
}
