use crate::data::{DefinitionKind, SkillDef};
use crate::error::DataIntegrityError;
use crate::leveled::level::{select_row_with_policy, LevelPolicy, LevelQuery};
use crate::leveled::ResolveContext;

/// A skill bound to one level row.
#[derive(Debug, Clone)]
pub struct LeveledSkill<'a> {
    pub def: &'a SkillDef,
    pub level: u32,
    pub sub_level: u32,
    pub name: String,
    pub description: String,
    pub simple_description: Option<String>,
    pub params: Vec<f64>,
}

pub fn bind_skill<'a>(
    def: &'a SkillDef,
    query: LevelQuery,
    policy: LevelPolicy,
    ctx: &ResolveContext<'_>,
) -> Result<Option<LeveledSkill<'a>>, DataIntegrityError> {
    let Some(row) =
        select_row_with_policy(&def.levels, query, policy, DefinitionKind::Skill, def.id)?
    else {
        return Ok(None);
    };

    let localizer = &ctx.localizer;
    Ok(Some(LeveledSkill {
        def,
        level: query.level,
        sub_level: query.sub_level,
        name: localizer.text(&def.name),
        description: localizer.resolve(&def.description, &row.params),
        simple_description: def
            .simple_description
            .as_ref()
            .map(|handle| localizer.resolve(handle, &row.params)),
        params: row.params.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GameTables, Language, SkillLevelRow, TextHandle, TextMap};
    use crate::leveled::Localizer;

    fn skill() -> SkillDef {
        SkillDef {
            id: 100101,
            name: TextHandle::Hash(1),
            kind: "Normal".to_string(),
            effect: "SingleAttack".to_string(),
            description: TextHandle::Dynamic { dynamic: 2 },
            simple_description: None,
            levels: (1..=3)
                .map(|level| SkillLevelRow {
                    level,
                    sub_level: 0,
                    params: vec![0.4 + 0.1 * f64::from(level)],
                })
                .collect(),
        }
    }

    #[test]
    fn binds_each_level_with_its_own_params() {
        let tables = GameTables::new();
        let mut texts = TextMap::new();
        texts.insert(Language::En, 1, "Frigid Cold Arrow");
        texts.insert(Language::En, 2, "Deals Ice DMG equal to #1[i]% of ATK.");
        let ctx = ResolveContext::new(&tables, Localizer::new(&texts, Language::En));
        let def = skill();

        let bound = bind_skill(&def, LevelQuery::new(1), LevelPolicy::Required, &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(bound.name, "Frigid Cold Arrow");
        assert_eq!(bound.description, "Deals Ice DMG equal to 50% of ATK.");

        let bound = bind_skill(&def, LevelQuery::new(3), LevelPolicy::Required, &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(bound.description, "Deals Ice DMG equal to 70% of ATK.");
    }

    #[test]
    fn missing_level_is_skipped_or_fatal_by_policy() {
        let tables = GameTables::new();
        let texts = TextMap::new();
        let ctx = ResolveContext::new(&tables, Localizer::new(&texts, Language::En));
        let def = skill();

        assert!(bind_skill(&def, LevelQuery::new(4), LevelPolicy::Optional, &ctx)
            .unwrap()
            .is_none());
        let err = bind_skill(&def, LevelQuery::new(4), LevelPolicy::Required, &ctx).unwrap_err();
        assert_eq!(err.id, 100101);
        assert_eq!(err.kind, DefinitionKind::Skill);
    }
}
