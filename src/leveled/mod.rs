//! Leveled resolution: bind static definitions to a level row and resolve
//! their localized text, parameters and stat bonuses.

mod character;
mod eidolon;
mod level;
mod localize;
mod skill;
mod stats;
mod trace;

pub use character::{bind_character, BaseStats, LeveledCharacter, Progression, MAX_EIDOLON};
pub use eidolon::{bind_eidolon, LeveledEidolon};
pub use level::{
    is_levelless, max_level, select_row, select_row_with_policy, LevelPolicy, LevelQuery,
    LevelRow, LEVELLESS,
};
pub use localize::{expand_template, format_stat_value, Localizer};
pub use skill::{bind_skill, LeveledSkill};
pub use stats::{describe_stat, reconcile, stat_name, stat_totals, StatBonus};
pub use trace::{bind_trace, LeveledTrace, NodePayload, SkillUpgrade};

use crate::data::GameTables;

/// Read-only inputs every binding needs: the definition arena and a localizer.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub tables: &'a GameTables,
    pub localizer: Localizer<'a>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(tables: &'a GameTables, localizer: Localizer<'a>) -> Self {
        Self { tables, localizer }
    }
}
