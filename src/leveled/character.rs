//! Character progression: level, ascension and eidolon rank, and the base
//! stats they select.

use serde::{Deserialize, Serialize};

use crate::data::{CharacterDef, DefinitionKind, PromotionRow};
use crate::error::ExtractError;
use crate::leveled::level::{select_row, select_row_with_policy, LevelPolicy, LevelQuery};
use crate::leveled::ResolveContext;

pub const MAX_EIDOLON: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub ascension: u8,
    pub eidolon: u8,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            ascension: 0,
            eidolon: 0,
        }
    }
}

impl Progression {
    pub fn new(level: u32, ascension: u8, eidolon: u8) -> Self {
        Self {
            level,
            ascension,
            eidolon,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: f64,
    pub atk: f64,
    pub def: f64,
    pub spd: f64,
    pub crit_rate: f64,
    pub crit_dmg: f64,
    pub aggro: f64,
}

impl BaseStats {
    pub fn at_level(row: &PromotionRow, level: u32) -> Self {
        Self {
            hp: row.hp.at_level(level),
            atk: row.atk.at_level(level),
            def: row.def.at_level(level),
            spd: row.spd,
            crit_rate: row.crit_rate,
            crit_dmg: row.crit_dmg,
            aggro: row.aggro,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeveledCharacter<'a> {
    pub def: &'a CharacterDef,
    pub name: String,
    pub progression: Progression,
    /// Level cap of the selected ascension phase.
    pub level_cap: u32,
    pub base_stats: BaseStats,
}

fn invalid(def: &CharacterDef, reason: String) -> ExtractError {
    ExtractError::InvalidProgression {
        character: def.id,
        reason,
    }
}

/// Bind a character at `progression`.
///
/// The ascension-0 row is required of every character; its absence is a data
/// integrity error. A progression the data cannot satisfy (unknown ascension,
/// level over the cap, eidolon over 6) is rejected as caller input.
pub fn bind_character<'a>(
    def: &'a CharacterDef,
    progression: Progression,
    ctx: &ResolveContext<'_>,
) -> Result<LeveledCharacter<'a>, ExtractError> {
    select_row_with_policy(
        &def.promotions,
        LevelQuery::new(1),
        LevelPolicy::Required,
        DefinitionKind::Promotion,
        def.id,
    )?;

    if progression.eidolon > MAX_EIDOLON {
        return Err(invalid(
            def,
            format!("eidolon {} exceeds {MAX_EIDOLON}", progression.eidolon),
        ));
    }
    let query = LevelQuery::new(u32::from(progression.ascension) + 1);
    let row = select_row(&def.promotions, query).ok_or_else(|| {
        invalid(def, format!("no ascension {} data", progression.ascension))
    })?;
    if progression.level == 0 || progression.level > row.max_level {
        return Err(invalid(
            def,
            format!(
                "level {} outside 1..={} for ascension {}",
                progression.level, row.max_level, progression.ascension
            ),
        ));
    }

    Ok(LeveledCharacter {
        def,
        name: ctx.localizer.text(&def.name),
        progression,
        level_cap: row.max_level,
        base_stats: BaseStats::at_level(row, progression.level),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GameTables, Language, StatGrowth, TextHandle, TextMap};
    use crate::error::DataIntegrityError;
    use crate::leveled::Localizer;

    fn promotion(promotion: u8, max_level: u32) -> PromotionRow {
        PromotionRow {
            promotion,
            max_level,
            hp: StatGrowth {
                base: 100.0 + 50.0 * f64::from(promotion),
                step: 5.0,
            },
            atk: StatGrowth { base: 50.0, step: 2.5 },
            def: StatGrowth { base: 40.0, step: 2.0 },
            spd: 101.0,
            crit_rate: 0.05,
            crit_dmg: 0.5,
            aggro: 75.0,
        }
    }

    fn character(promotions: Vec<PromotionRow>) -> CharacterDef {
        CharacterDef {
            id: 1001,
            name: TextHandle::Hash(1),
            rarity: 4,
            path: "Preservation".to_string(),
            element: "Ice".to_string(),
            skills: Vec::new(),
            trace_nodes: Vec::new(),
            eidolons: Vec::new(),
            promotions,
        }
    }

    #[test]
    fn base_stats_grow_with_level_inside_the_phase() {
        let tables = GameTables::new();
        let texts = TextMap::new();
        let ctx = ResolveContext::new(&tables, Localizer::new(&texts, Language::En));
        let def = character(vec![promotion(0, 20), promotion(1, 30)]);

        let bound = bind_character(&def, Progression::new(25, 1, 0), &ctx).unwrap();
        assert_eq!(bound.level_cap, 30);
        assert_eq!(bound.base_stats.hp, 150.0 + 5.0 * 24.0);
        assert_eq!(bound.base_stats.atk, 50.0 + 2.5 * 24.0);
        assert_eq!(bound.base_stats.spd, 101.0);
    }

    #[test]
    fn missing_first_promotion_is_a_data_integrity_error() {
        let tables = GameTables::new();
        let texts = TextMap::new();
        let ctx = ResolveContext::new(&tables, Localizer::new(&texts, Language::En));
        let def = character(vec![promotion(1, 30)]);

        let err = bind_character(&def, Progression::default(), &ctx).unwrap_err();
        assert_eq!(
            err,
            ExtractError::DataIntegrity(DataIntegrityError {
                kind: DefinitionKind::Promotion,
                id: 1001,
                level: 1,
                sub_level: 0,
            })
        );
    }

    #[test]
    fn unreachable_progression_is_rejected() {
        let tables = GameTables::new();
        let texts = TextMap::new();
        let ctx = ResolveContext::new(&tables, Localizer::new(&texts, Language::En));
        let def = character(vec![promotion(0, 20)]);

        for progression in [
            Progression::new(21, 0, 0),
            Progression::new(0, 0, 0),
            Progression::new(10, 3, 0),
            Progression::new(10, 0, 7),
        ] {
            let err = bind_character(&def, progression, &ctx).unwrap_err();
            assert!(
                matches!(err, ExtractError::InvalidProgression { character: 1001, .. }),
                "{progression:?} gave {err:?}"
            );
        }
    }
}
