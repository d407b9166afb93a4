use std::collections::HashMap;

use crate::data::{DefinitionKind, SkillDef, SkillId};
use crate::extract::kinds::skill_kind_label;
use crate::extract::observer::{Section, SkipReason};
use crate::extract::records::{EidolonExport, EidolonSkillUpgrade};
use crate::extract::CharacterScope;
use crate::leveled::bind_eidolon;

impl CharacterScope<'_> {
    /// The character's eidolons sorted by rank, whatever order the table lists
    /// them in.
    pub fn eidolons(&self) -> Vec<EidolonExport> {
        let tables = self.ctx.tables;
        let skills: HashMap<SkillId, &SkillDef> = self
            .character
            .skills
            .iter()
            .filter_map(|&id| tables.skill(id).map(|skill| (id, skill)))
            .collect();

        let mut eidolons = Vec::with_capacity(self.character.eidolons.len());
        for &eidolon_id in &self.character.eidolons {
            let Some(def) = tables.eidolon(eidolon_id) else {
                self.skip(
                    Section::Eidolons,
                    eidolon_id,
                    SkipReason::MissingDefinition {
                        kind: DefinitionKind::Eidolon,
                        id: eidolon_id,
                    },
                );
                continue;
            };
            let bound = bind_eidolon(def, &self.ctx);

            let mut skill_upgrades = Vec::with_capacity(def.skill_upgrades.len());
            for upgrade in &def.skill_upgrades {
                let Some(skill) = skills.get(&upgrade.skill) else {
                    self.skip(
                        Section::Eidolons,
                        eidolon_id,
                        SkipReason::MissingDefinition {
                            kind: DefinitionKind::Skill,
                            id: upgrade.skill,
                        },
                    );
                    continue;
                };
                let Some(skill_type) = skill_kind_label(&skill.kind) else {
                    self.skip(
                        Section::Eidolons,
                        eidolon_id,
                        SkipReason::UnrecognizedKind {
                            tag: skill.kind.clone(),
                        },
                    );
                    continue;
                };
                skill_upgrades.push(EidolonSkillUpgrade {
                    skill_id: upgrade.skill,
                    skill_type: skill_type.to_string(),
                    skill_name: self.ctx.localizer.text(&skill.name),
                    amount: upgrade.amount,
                });
            }

            eidolons.push(EidolonExport {
                id: def.id,
                rank: def.rank,
                name: bound.name,
                description: bound.description,
                params: def.params.clone(),
                unlocked: def.rank <= self.progression.eidolon,
                skill_upgrades,
            });
        }

        eidolons.sort_by_key(|eidolon| eidolon.rank);
        eidolons
    }

    /// Extra skill levels granted by the eidolons unlocked at the current rank.
    pub(crate) fn eidolon_skill_bonuses(&self) -> HashMap<SkillId, u32> {
        let tables = self.ctx.tables;
        let mut bonuses = HashMap::new();
        for def in self
            .character
            .eidolons
            .iter()
            .filter_map(|&id| tables.eidolon(id))
            .filter(|def| def.rank <= self.progression.eidolon)
        {
            for upgrade in &def.skill_upgrades {
                *bonuses.entry(upgrade.skill).or_insert(0) += upgrade.amount;
            }
        }
        bonuses
    }
}
