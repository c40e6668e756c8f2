use crate::parser::text::{is_image_line, strip_formatting};

/// Stat-block fields located by their leading label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ArmorClass,
    HitPoints,
    Speed,
    SavingThrows,
    Skills,
    DamageVulnerabilities,
    DamageResistances,
    DamageImmunities,
    ConditionImmunities,
    /// Unqualified "Immunities" line, routed by content.
    Immunities,
    Senses,
    Languages,
    Challenge,
    ProficiencyBonus,
}

/// Accepted labels per field, tried in order.
pub const FIELD_LABELS: &[(Field, &[&str])] = &[
    (Field::ArmorClass, &["Armor Class", "AC"]),
    (Field::HitPoints, &["Hit Points", "HP"]),
    (Field::Speed, &["Speed"]),
    (Field::SavingThrows, &["Saving Throws", "Saves"]),
    (Field::Skills, &["Skills"]),
    (Field::DamageVulnerabilities, &["Damage Vulnerabilities", "Vulnerabilities"]),
    (Field::DamageResistances, &["Damage Resistances", "Resistances"]),
    (Field::DamageImmunities, &["Damage Immunities"]),
    (Field::ConditionImmunities, &["Condition Immunities"]),
    (Field::Immunities, &["Immunities"]),
    (Field::Senses, &["Senses"]),
    (Field::Languages, &["Languages"]),
    (Field::Challenge, &["Challenge", "CR"]),
    (Field::ProficiencyBonus, &["Proficiency Bonus", "PB"]),
];

impl Field {
    pub fn labels(self) -> &'static [&'static str] {
        FIELD_LABELS
            .iter()
            .find(|(f, _)| *f == self)
            .map(|(_, labels)| *labels)
            .unwrap_or(&[])
    }
}

/// Stripped, non-empty stat-block lines, built once per page.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    lines: Vec<String>,
}

impl LineIndex {
    pub fn new(raw: &[String]) -> Self {
        let lines = raw
            .iter()
            .filter(|l| !is_image_line(l))
            .map(|l| strip_formatting(l))
            .filter(|l| !l.is_empty())
            .collect();
        LineIndex { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Value of the first line carrying one of `field`'s labels, label removed.
    pub fn lookup(&self, field: Field) -> Option<&str> {
        field
            .labels()
            .iter()
            .find_map(|label| self.lines.iter().find_map(|line| value_after_label(line, label)))
    }
}

/// `"Armor Class 14 (natural armor)"` with label `"Armor Class"` → `"14 (natural armor)"`.
/// The label must be the whole line or be followed by a space (or colon).
fn value_after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = &line[label.len()..];
    if rest.is_empty() || rest.starts_with(' ') || rest.starts_with(':') {
        Some(rest.trim_start_matches(':').trim())
    } else {
        None
    }
}
