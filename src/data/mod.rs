pub mod loader;
pub mod manifest;
pub mod property;
pub mod registry;
pub mod tables;
pub mod text;
pub mod validate;

pub use loader::{load_tables, load_text_map};
pub use property::{StatAdd, StatKind, StatPropertyDef};
pub use registry::DataRegistry;
pub use tables::{
    CharacterDef, CharacterId, DefinitionKind, EidolonDef, EidolonId, GameTables, PromotionRow,
    SkillDef, SkillId, SkillLevelRow, SkillRef, SkillUpgradeRef, StatGrowth, TraceDetail,
    TraceId, TraceLevelRow, TraceNodeDef, UnlockRequirement,
};
pub use text::{Language, TextHandle, TextHash, TextMap, UnknownLanguage};
