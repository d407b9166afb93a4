//! Trace nodes bound to a level, with their payload classified once.

use tracing::debug;

use crate::data::{DefinitionKind, SkillRef, StatAdd, TraceDetail, TraceNodeDef};
use crate::error::DataIntegrityError;
use crate::leveled::level::{select_row_with_policy, LevelPolicy, LevelQuery};
use crate::leveled::stats::StatBonus;
use crate::leveled::ResolveContext;

/// What a trace row grants.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    /// A single typed stat delta (minor trace).
    StatBonus(StatBonus),
    /// An effect on a skill (major trace, skill node).
    SkillUpgrade(SkillUpgrade),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillUpgrade {
    pub effect: String,
    /// Node-level description, already localized and expanded.
    pub description: String,
    pub params: Vec<f64>,
    pub skill: Option<SkillRef>,
}

#[derive(Debug, Clone)]
pub struct LeveledTrace<'a> {
    pub def: &'a TraceNodeDef,
    pub level: u32,
    pub name: Option<String>,
    pub description: String,
    pub params: Vec<f64>,
    /// Stats listed on the row itself, separate from the payload.
    pub stats: Vec<StatBonus>,
    pub payload: NodePayload,
}

fn resolve_stats(adds: &[StatAdd], node: u32, ctx: &ResolveContext<'_>) -> Vec<StatBonus> {
    adds.iter()
        .filter_map(|add| {
            let bonus = StatBonus::from_raw(add, ctx.tables);
            if bonus.is_none() {
                debug!(node, property = %add.property, "unknown stat property; dropped");
            }
            bonus
        })
        .collect()
}

pub fn bind_trace<'a>(
    def: &'a TraceNodeDef,
    query: LevelQuery,
    policy: LevelPolicy,
    ctx: &ResolveContext<'_>,
) -> Result<Option<LeveledTrace<'a>>, DataIntegrityError> {
    let Some(row) =
        select_row_with_policy(&def.levels, query, policy, DefinitionKind::TraceNode, def.id)?
    else {
        return Ok(None);
    };

    let localizer = &ctx.localizer;
    let description = localizer.resolve_opt(row.description.as_ref(), &row.params);

    let payload = match &row.detail {
        Some(TraceDetail::StatBonus { stat }) => match StatBonus::from_raw(stat, ctx.tables) {
            Some(bonus) => NodePayload::StatBonus(bonus),
            None => {
                debug!(
                    node = def.id,
                    property = %stat.property,
                    "stat payload has unknown property"
                );
                NodePayload::Empty
            }
        },
        Some(TraceDetail::SkillUpgrade {
            effect,
            description: detail_description,
            params,
            skill,
        }) => {
            let params = if params.is_empty() {
                row.params.clone()
            } else {
                params.clone()
            };
            let description = match detail_description {
                Some(handle) => localizer.resolve(handle, &params),
                None => description.clone(),
            };
            NodePayload::SkillUpgrade(SkillUpgrade {
                effect: effect.clone(),
                description,
                params,
                skill: *skill,
            })
        }
        None => NodePayload::Empty,
    };

    Ok(Some(LeveledTrace {
        def,
        level: query.level,
        name: row.name.as_ref().map(|handle| localizer.text(handle)),
        description,
        params: row.params.clone(),
        stats: resolve_stats(&row.stats, def.id, ctx),
        payload,
    }))
}
