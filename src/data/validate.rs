//! Structural checks over loaded tables, run before extraction by the
//! `validate` command. Errors mark data that will fail extraction; warnings
//! mark data that will be skipped or silently dropped.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::data::property::StatAdd;
use crate::data::tables::{
    CharacterDef, EidolonDef, GameTables, SkillDef, TraceDetail, TraceNodeDef,
};
use crate::extract::kinds::{skill_effect_label, skill_kind_label};
use crate::leveled::{is_levelless, max_level, LevelRow, MAX_EIDOLON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }

    /// Diagnostics ordered by severity, then context.
    pub fn sorted(&self) -> Vec<&ValidationDiagnostic> {
        let mut sorted: Vec<_> = self.diagnostics.iter().collect();
        sorted.sort_by(|a, b| (a.severity, &a.context).cmp(&(b.severity, &b.context)));
        sorted
    }
}

pub fn validate_tables(tables: &GameTables) -> ValidationReport {
    let mut report = ValidationReport::default();

    for id in tables.character_ids() {
        if let Some(character) = tables.character(id) {
            validate_character(&mut report, tables, character);
        }
    }

    let mut skill_ids: Vec<_> = tables.skills.keys().copied().collect();
    skill_ids.sort_unstable();
    for id in skill_ids {
        if let Some(skill) = tables.skill(id) {
            validate_skill(&mut report, skill);
        }
    }

    let mut node_ids: Vec<_> = tables.trace_nodes.keys().copied().collect();
    node_ids.sort_unstable();
    for id in node_ids {
        if let Some(node) = tables.trace_node(id) {
            validate_trace_node(&mut report, tables, node);
        }
    }

    report
}

fn validate_character(
    report: &mut ValidationReport,
    tables: &GameTables,
    character: &CharacterDef,
) {
    let context = format!("character[{}]", character.id);

    for &skill in &character.skills {
        if tables.skill(skill).is_none() {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.skills"),
                format!("dangling skill reference {skill}"),
            );
        }
    }
    for &node in &character.trace_nodes {
        if tables.trace_node(node).is_none() {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.trace_nodes"),
                format!("dangling trace node reference {node}"),
            );
        }
    }

    let promotions: Vec<u8> = character.promotions.iter().map(|row| row.promotion).collect();
    if !promotions.contains(&0) {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.promotions"),
            "missing ascension 0 row",
        );
    }
    if let Some(duplicate) = first_duplicate(promotions.iter().copied()) {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.promotions"),
            format!("duplicate row for ascension {duplicate}"),
        );
    }

    let mut ranks = HashSet::new();
    for &eidolon_id in &character.eidolons {
        let Some(eidolon) = tables.eidolon(eidolon_id) else {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.eidolons"),
                format!("dangling eidolon reference {eidolon_id}"),
            );
            continue;
        };
        if !ranks.insert(eidolon.rank) {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.eidolons"),
                format!("duplicate eidolon rank {}", eidolon.rank),
            );
        }
        validate_eidolon(report, character, eidolon);
    }
}

fn validate_eidolon(report: &mut ValidationReport, character: &CharacterDef, eidolon: &EidolonDef) {
    let context = format!("eidolon[{}]", eidolon.id);
    if eidolon.rank == 0 || eidolon.rank > MAX_EIDOLON {
        report.push(
            ValidationSeverity::Warning,
            context.clone(),
            format!("rank {} outside 1..={MAX_EIDOLON}", eidolon.rank),
        );
    }
    for upgrade in &eidolon.skill_upgrades {
        if !character.skills.contains(&upgrade.skill) {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.skill_upgrades"),
                format!(
                    "skill {} is not a skill of character {}",
                    upgrade.skill, character.id
                ),
            );
        }
    }
}

fn validate_skill(report: &mut ValidationReport, skill: &SkillDef) {
    let context = format!("skill[{}]", skill.id);
    if skill_kind_label(&skill.kind).is_none() {
        report.push(
            ValidationSeverity::Warning,
            context.clone(),
            format!("unrecognized skill kind '{}'", skill.kind),
        );
    }
    if skill_effect_label(&skill.effect).is_none() {
        report.push(
            ValidationSeverity::Warning,
            context.clone(),
            format!("unrecognized skill effect '{}'", skill.effect),
        );
    }
    validate_rows(report, &format!("{context}.levels"), &skill.levels);

    // Extraction requires the level-1 row of every skill it reaches.
    let has_first_level = is_levelless(&skill.levels)
        || skill
            .levels
            .iter()
            .any(|row| row.level() == 1 && row.sub_level() == 0);
    if !has_first_level {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.levels"),
            "no row for level 1 (sub-level 0)",
        );
    }
}

fn validate_trace_node(report: &mut ValidationReport, tables: &GameTables, node: &TraceNodeDef) {
    let context = format!("trace_node[{}]", node.id);

    if let Some(skill) = node.base_skill {
        if tables.skill(skill).is_none() {
            report.push(
                ValidationSeverity::Warning,
                context.clone(),
                format!("dangling base skill reference {skill}"),
            );
        }
    }
    for &prerequisite in &node.prerequisites {
        if tables.trace_node(prerequisite).is_none() {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.prerequisites"),
                format!("dangling prerequisite {prerequisite}"),
            );
        }
    }

    validate_rows(report, &format!("{context}.levels"), &node.levels);
    if !node.levels.is_empty() && !is_levelless(&node.levels) {
        let highest = max_level(&node.levels);
        if highest != node.max_level {
            report.push(
                ValidationSeverity::Warning,
                context.clone(),
                format!("max_level {} but rows reach level {highest}", node.max_level),
            );
        }
    }

    for row in &node.levels {
        let row_context = format!("{context}.levels[{}]", row.level);
        for stat in &row.stats {
            check_property(report, tables, &row_context, stat);
        }
        match &row.detail {
            Some(TraceDetail::StatBonus { stat }) => {
                check_property(report, tables, &row_context, stat)
            }
            Some(TraceDetail::SkillUpgrade { .. }) => {}
            None if node.max_level == 1 && node.base_skill.is_none() => report.push(
                ValidationSeverity::Info,
                row_context,
                "row carries neither a stat nor a skill upgrade",
            ),
            None => {}
        }
    }
}

fn check_property(
    report: &mut ValidationReport,
    tables: &GameTables,
    context: &str,
    stat: &StatAdd,
) {
    if tables.property(&stat.property).is_none() {
        report.push(
            ValidationSeverity::Warning,
            context,
            format!("unknown stat property '{}'", stat.property),
        );
    }
}

/// Duplicate `(level, sub_level)` pairs and gaps in the level range.
fn validate_rows<R: LevelRow>(report: &mut ValidationReport, context: &str, rows: &[R]) {
    if rows.is_empty() {
        report.push(ValidationSeverity::Warning, context, "no level rows");
        return;
    }
    let keys = rows.iter().map(|row| (row.level(), row.sub_level()));
    if let Some((level, sub_level)) = first_duplicate(keys) {
        report.push(
            ValidationSeverity::Error,
            context,
            format!("duplicate row for level {level} (sub-level {sub_level})"),
        );
    }
    if is_levelless(rows) {
        return;
    }

    let levels: BTreeSet<u32> = rows.iter().map(LevelRow::level).collect();
    if levels.contains(&0) {
        report.push(
            ValidationSeverity::Error,
            context,
            "levelless row mixed with leveled rows",
        );
    }
    let missing: Vec<String> = (1..=max_level(rows))
        .filter(|level| !levels.contains(level))
        .map(|level| level.to_string())
        .collect();
    if !missing.is_empty() {
        report.push(
            ValidationSeverity::Warning,
            context,
            format!("non-contiguous levels; missing {}", missing.join(", ")),
        );
    }
}

fn first_duplicate<T, I>(values: I) -> Option<T>
where
    T: std::hash::Hash + Eq + Copy,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values.into_iter().find(|value| !seen.insert(*value))
}
