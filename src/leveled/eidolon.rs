use crate::data::EidolonDef;
use crate::leveled::ResolveContext;

/// An eidolon with its text resolved. Eidolons have no level rows; the rank
/// is fixed by the definition.
#[derive(Debug, Clone)]
pub struct LeveledEidolon<'a> {
    pub def: &'a EidolonDef,
    pub name: String,
    pub description: String,
}

pub fn bind_eidolon<'a>(def: &'a EidolonDef, ctx: &ResolveContext<'_>) -> LeveledEidolon<'a> {
    LeveledEidolon {
        def,
        name: ctx.localizer.text(&def.name),
        description: ctx.localizer.resolve(&def.description, &def.params),
    }
}
