use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::data::{GameTables, StatAdd, StatKind};
use crate::leveled::localize::{format_stat_value, Localizer};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatBonus {
    #[serde(rename = "type")]
    pub kind: StatKind,
    pub value: f64,
    pub is_percent: bool,
}

impl StatBonus {
    pub fn new(kind: StatKind, value: f64, is_percent: bool) -> Self {
        Self {
            kind,
            value,
            is_percent,
        }
    }

    pub fn percent(kind: StatKind, value: f64) -> Self {
        Self::new(kind, value, true)
    }

    pub fn flat(kind: StatKind, value: f64) -> Self {
        Self::new(kind, value, false)
    }

    /// Resolve a raw property contribution through the property table.
    /// Unknown properties resolve to `None`.
    pub fn from_raw(add: &StatAdd, tables: &GameTables) -> Option<Self> {
        let property = tables.property(&add.property)?;
        Some(Self::new(property.kind, add.value, property.percent))
    }

    fn identity(&self) -> (StatKind, u64) {
        (self.kind, self.value.to_bits())
    }
}

/// Localized stat name, falling back to the kind's English label.
///
/// Properties whose percent flag matches the bonus win; ties go to the
/// lexically first property key.
pub fn stat_name(bonus: &StatBonus, tables: &GameTables, localizer: &Localizer<'_>) -> String {
    let mut candidates: Vec<_> = tables
        .properties
        .values()
        .filter(|property| property.kind == bonus.kind)
        .collect();
    candidates.sort_by(|a, b| {
        let a_key = (a.percent != bonus.is_percent, a.property.as_str());
        let b_key = (b.percent != bonus.is_percent, b.property.as_str());
        a_key.cmp(&b_key)
    });
    candidates
        .into_iter()
        .filter_map(|property| property.name.as_ref())
        .map(|handle| localizer.text(handle))
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| bonus.kind.label().to_string())
}

/// `"ATK +8%"`-style description of a single bonus.
pub fn describe_stat(bonus: &StatBonus, tables: &GameTables, localizer: &Localizer<'_>) -> String {
    format!(
        "{} +{}",
        stat_name(bonus, tables, localizer),
        format_stat_value(bonus.value, bonus.is_percent)
    )
}

/// Merge two stat lists: `primary` entries first, then `secondary` in order,
/// dropping any entry whose (kind, value) is already present.
///
/// Entries from different sources that differ only in value are both kept;
/// only exact duplicates collapse.
pub fn reconcile(primary: &[StatBonus], secondary: &[StatBonus]) -> Vec<StatBonus> {
    let mut seen = HashSet::with_capacity(primary.len() + secondary.len());
    primary
        .iter()
        .chain(secondary)
        .filter(|bonus| seen.insert(bonus.identity()))
        .copied()
        .collect()
}

/// Sum bonuses per (kind, percent flag), ordered by kind then flat before percent.
pub fn stat_totals<'a, I>(bonuses: I) -> Vec<StatBonus>
where
    I: IntoIterator<Item = &'a StatBonus>,
{
    let mut totals: BTreeMap<(StatKind, bool), f64> = BTreeMap::new();
    for bonus in bonuses {
        *totals.entry((bonus.kind, bonus.is_percent)).or_default() += bonus.value;
    }
    totals
        .into_iter()
        .map(|((kind, is_percent), value)| StatBonus::new(kind, value, is_percent))
        .collect()
}
