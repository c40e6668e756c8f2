//! Short display tags derived from a record.
//!
//! Tags are deduplicated case-insensitively and ordered so the combat numbers
//! always lead: `HP`, `AC`, `CR`, `PB`, then everything else in original order.

use std::collections::HashSet;

use crate::record::MonsterRecord;

const PRIORITY_PREFIXES: [&str; 4] = ["hp ", "ac ", "cr ", "pb "];

/// One candidate tag per populated field.
pub fn synthesize(record: &MonsterRecord) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(hp) = record.hit_points {
        tags.push(format!("HP {}", hp));
    }
    if let Some(ac) = record.armor_class {
        tags.push(format!("AC {}", ac));
    }
    push_labeled(&mut tags, "CR", &record.challenge_rating);
    push_labeled(&mut tags, "PB", &record.proficiency_bonus);
    if !record.type_line.trim().is_empty() {
        tags.push(record.type_line.clone());
    }
    push_labeled(&mut tags, "Speed", &record.speed);
    push_labeled(&mut tags, "Saves", &record.saving_throws);
    push_labeled(&mut tags, "Skills", &record.skills);
    push_labeled(&mut tags, "Vulnerable", &record.damage_vulnerabilities);
    push_labeled(&mut tags, "Resist", &record.damage_resistances);
    push_labeled(&mut tags, "Immune", &record.damage_immunities);
    push_labeled(&mut tags, "Condition Immune", &record.condition_immunities);
    tags
}

fn push_labeled(tags: &mut Vec<String>, label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        tags.push(format!("{} {}", label, value));
    }
}

/// Trim and collapse internal whitespace.
pub fn normalize(tag: &str) -> String {
    tag.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive dedupe keeping the first spelling seen; blank tags dropped.
pub fn dedupe<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .map(|t| normalize(t.as_ref()))
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_lowercase()))
        .collect()
}

/// Stable bucket sort: HP, AC, CR, PB, rest.
pub fn prioritize<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut ordered: Vec<String> = tags.iter().map(|t| t.as_ref().to_string()).collect();
    ordered.sort_by_key(|t| bucket(t));
    ordered
}

/// Union of `manual` and synthesized tags, deduped and prioritized.
/// Passing a record's own tags back in as `manual` yields the same list.
pub fn build<S: AsRef<str>>(record: &MonsterRecord, manual: &[S]) -> Vec<String> {
    let merged: Vec<String> = manual
        .iter()
        .map(|t| t.as_ref().to_string())
        .chain(synthesize(record))
        .collect();
    prioritize(&dedupe(&merged))
}

fn bucket(tag: &str) -> usize {
    let lower = tag.to_lowercase();
    PRIORITY_PREFIXES
        .iter()
        .position(|p| lower.starts_with(p))
        .unwrap_or(PRIORITY_PREFIXES.len())
}
