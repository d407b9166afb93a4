use std::collections::HashSet;

use crate::data::DefinitionKind;
use crate::error::ExtractError;
use crate::extract::kinds::{skill_effect_label, skill_kind_label};
use crate::extract::observer::{Section, SkipReason};
use crate::extract::records::{SkillData, SkillLevel};
use crate::extract::CharacterScope;
use crate::leveled::{bind_skill, LevelPolicy, LevelQuery};

impl CharacterScope<'_> {
    /// One [SkillData] per trace node whose base skill has a recognized kind,
    /// in node order, with every level that has data.
    pub fn skills(&self) -> Result<Vec<SkillData>, ExtractError> {
        let tables = self.ctx.tables;
        let bonuses = self.eidolon_skill_bonuses();
        let mut seen = HashSet::new();
        let mut skills = Vec::new();

        for &node_id in &self.character.trace_nodes {
            let Some(node) = tables.trace_node(node_id) else {
                self.skip(
                    Section::Skills,
                    node_id,
                    SkipReason::MissingDefinition {
                        kind: DefinitionKind::TraceNode,
                        id: node_id,
                    },
                );
                continue;
            };
            let Some(skill_id) = node.base_skill else {
                continue;
            };
            if !seen.insert(skill_id) {
                continue;
            }
            let Some(skill) = tables.skill(skill_id) else {
                self.skip(
                    Section::Skills,
                    node_id,
                    SkipReason::MissingDefinition {
                        kind: DefinitionKind::Skill,
                        id: skill_id,
                    },
                );
                continue;
            };
            let Some(skill_type) = skill_kind_label(&skill.kind) else {
                self.skip(
                    Section::Skills,
                    skill_id,
                    SkipReason::UnrecognizedKind {
                        tag: skill.kind.clone(),
                    },
                );
                continue;
            };
            let Some(effect) = skill_effect_label(&skill.effect) else {
                self.skip(
                    Section::Skills,
                    skill_id,
                    SkipReason::UnrecognizedKind {
                        tag: skill.effect.clone(),
                    },
                );
                continue;
            };

            let Some(first) =
                bind_skill(skill, LevelQuery::new(1), LevelPolicy::Required, &self.ctx)?
            else {
                continue;
            };

            let mut levels = Vec::with_capacity(node.max_level as usize);
            for level in 1..=node.max_level {
                match bind_skill(skill, LevelQuery::new(level), LevelPolicy::Optional, &self.ctx)? {
                    Some(bound) => levels.push(SkillLevel {
                        level,
                        params: bound.params,
                    }),
                    None => {
                        self.skip(Section::Skills, skill_id, SkipReason::LevelNotFound { level })
                    }
                }
            }
            levels.sort_by_key(|entry| entry.level);

            skills.push(SkillData {
                id: skill_id,
                node_id,
                name: first.name,
                skill_type: skill_type.to_string(),
                effect: effect.to_string(),
                description: first.description,
                simple_description: first.simple_description,
                max_level: node.max_level,
                eidolon_bonus: bonuses.get(&skill_id).copied().unwrap_or(0),
                levels,
            });
        }

        Ok(skills)
    }
}
