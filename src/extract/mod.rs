//! Character extraction: walk a character's trace nodes and eidolons and turn
//! them into flat export records.
//!
//! Extraction tolerates gaps in the source data. Items whose
//! definitions are missing or whose tags are unknown are reported to an
//! [ExtractObserver] and left out; only a data integrity error aborts.

mod eidolons;
pub mod kinds;
mod observer;
pub mod records;
mod skills;
mod traces;

pub use observer::{ExtractObserver, Section, SkipReason, Skipped, TracingObserver};
pub use records::{
    CharacterExport, EidolonExport, EidolonSkillUpgrade, SkillData, SkillLevel, TraceData,
    TraceKind,
};

use tracing::debug;

use crate::data::{CharacterDef, CharacterId, GameTables, Language, TextMap};
use crate::error::ExtractError;
use crate::leveled::{bind_character, stat_totals, Localizer, Progression, ResolveContext};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub language: Language,
    pub fallback: Language,
    pub progression: Progression,
}

impl ExtractOptions {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, fallback: Language) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }
}

/// One character being extracted. The three sections (skills, traces,
/// eidolons) are independent of each other and can be run separately.
pub struct CharacterScope<'a> {
    pub ctx: ResolveContext<'a>,
    pub character: &'a CharacterDef,
    pub progression: Progression,
    observer: &'a dyn ExtractObserver,
}

impl<'a> CharacterScope<'a> {
    pub fn new(
        ctx: ResolveContext<'a>,
        character: &'a CharacterDef,
        progression: Progression,
        observer: &'a dyn ExtractObserver,
    ) -> Self {
        Self {
            ctx,
            character,
            progression,
            observer,
        }
    }

    fn skip(&self, section: Section, item: u32, reason: SkipReason) {
        self.observer.skipped(&Skipped {
            character: self.character.id,
            section,
            item,
            reason,
        });
    }
}

/// Extract one character at `options.progression` in `options.language`.
pub fn extract_character(
    tables: &GameTables,
    texts: &TextMap,
    id: CharacterId,
    options: &ExtractOptions,
    observer: &dyn ExtractObserver,
) -> Result<CharacterExport, ExtractError> {
    let def = tables
        .character(id)
        .ok_or(ExtractError::UnknownCharacter(id))?;
    let localizer = Localizer::new(texts, options.language).with_fallback(options.fallback);
    let ctx = ResolveContext::new(tables, localizer);

    let character = bind_character(def, options.progression, &ctx)?;
    let scope = CharacterScope::new(ctx, def, options.progression, observer);

    let skills = scope.skills()?;
    let traces = scope.traces()?;
    let eidolons = scope.eidolons();
    let trace_totals = stat_totals(
        traces
            .iter()
            .filter(|trace| trace.unlocked)
            .flat_map(|trace| trace.stats.iter()),
    );

    debug!(
        character = id,
        skills = skills.len(),
        traces = traces.len(),
        eidolons = eidolons.len(),
        "extracted character"
    );

    Ok(CharacterExport {
        id,
        name: character.name,
        language: options.language,
        rarity: def.rarity,
        path: def.path.clone(),
        element: def.element.clone(),
        progression: options.progression,
        level_cap: character.level_cap,
        base_stats: character.base_stats,
        skills,
        traces,
        eidolons,
        trace_totals,
    })
}
