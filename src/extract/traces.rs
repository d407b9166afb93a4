use tracing::{debug, trace};

use crate::data::{DefinitionKind, TraceNodeDef};
use crate::error::ExtractError;
use crate::extract::kinds::is_technique_node;
use crate::extract::observer::{Section, SkipReason};
use crate::extract::records::{TraceData, TraceKind};
use crate::extract::CharacterScope;
use crate::leveled::{
    bind_skill, bind_trace, describe_stat, reconcile, stat_name, LevelPolicy, LevelQuery,
    LeveledSkill, NodePayload, SkillUpgrade,
};

impl CharacterScope<'_> {
    /// Single-level trace nodes, classified minor or major by payload.
    ///
    /// The technique node and multi-level nodes (skills) are left out.
    pub fn traces(&self) -> Result<Vec<TraceData>, ExtractError> {
        let tables = self.ctx.tables;
        let mut traces = Vec::new();

        for &node_id in &self.character.trace_nodes {
            let Some(node) = tables.trace_node(node_id) else {
                self.skip(
                    Section::Traces,
                    node_id,
                    SkipReason::MissingDefinition {
                        kind: DefinitionKind::TraceNode,
                        id: node_id,
                    },
                );
                continue;
            };
            if is_technique_node(node, tables) {
                trace!(node = node_id, "technique node excluded from traces");
                continue;
            }
            if node.max_level != 1 {
                if node.base_skill.is_none() {
                    debug!(
                        node = node_id,
                        max_level = node.max_level,
                        "multi-level node without a base skill is not extracted"
                    );
                }
                continue;
            }

            let bound = bind_trace(node, LevelQuery::new(1), LevelPolicy::Optional, &self.ctx)?;
            let Some(bound) = bound else {
                self.skip(Section::Traces, node_id, SkipReason::LevelNotFound { level: 1 });
                continue;
            };

            let (kind, name, description, params, stats) = match bound.payload {
                NodePayload::StatBonus(stat) => (
                    TraceKind::Minor,
                    bound
                        .name
                        .unwrap_or_else(|| stat_name(&stat, tables, &self.ctx.localizer)),
                    describe_stat(&stat, tables, &self.ctx.localizer),
                    bound.params,
                    reconcile(&[stat], &bound.stats),
                ),
                NodePayload::SkillUpgrade(upgrade) => {
                    let referenced = self.referenced_skill(node, &upgrade)?;
                    let (skill_name, description, params) = match referenced {
                        Some(skill) => (Some(skill.name), skill.description, skill.params),
                        None => (None, upgrade.description, upgrade.params),
                    };
                    (
                        TraceKind::Major,
                        bound.name.or(skill_name).unwrap_or_default(),
                        description,
                        params,
                        reconcile(&[], &bound.stats),
                    )
                }
                NodePayload::Empty => {
                    self.skip(Section::Traces, node_id, SkipReason::NoPayload);
                    continue;
                }
            };

            traces.push(TraceData {
                id: node_id,
                anchor: node.anchor.clone(),
                kind,
                name,
                description,
                params,
                stats,
                prerequisites: node.prerequisites.clone(),
                unlock_ascension: node.unlock.ascension,
                unlock_level: node.unlock.level,
                unlocked: self.is_unlocked(node),
            });
        }

        Ok(traces)
    }

    /// Skill-level data for a major node, which is preferred over the node's
    /// own text when it resolves.
    fn referenced_skill(
        &self,
        node: &TraceNodeDef,
        upgrade: &SkillUpgrade,
    ) -> Result<Option<LeveledSkill<'_>>, ExtractError> {
        let Some(reference) = upgrade.skill else {
            return Ok(None);
        };
        let Some(skill) = self.ctx.tables.skill(reference.id) else {
            debug!(
                node = node.id,
                skill = reference.id,
                "referenced skill missing; using node text"
            );
            return Ok(None);
        };
        let bound = bind_skill(
            skill,
            LevelQuery::new(reference.level),
            LevelPolicy::Optional,
            &self.ctx,
        )?;
        if bound.is_none() {
            debug!(
                node = node.id,
                skill = reference.id,
                level = reference.level,
                "referenced skill level missing; using node text"
            );
        }
        Ok(bound)
    }

    fn is_unlocked(&self, node: &TraceNodeDef) -> bool {
        self.progression.ascension >= node.unlock.ascension
            && self.progression.level >= node.unlock.level
    }
}
