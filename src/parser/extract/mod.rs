pub mod abilities;
pub mod challenge;
pub mod fields;
pub mod immunities;
pub mod name;
pub mod provenance;
pub mod stats;

use tracing::debug;

use self::fields::{Field, LineIndex, FIELD_LABELS};
use super::sections::{SectionKind, Segmented};
use crate::error::ImportError;
use crate::record::MonsterRecord;

/// Build everything except identity, tags and notes from a segmented page.
/// Only the name is mandatory; every other field degrades to empty.
pub fn extract(page: &Segmented) -> Result<MonsterRecord, ImportError> {
    let (name_index, name) = name::find_name(&page.preamble).ok_or(ImportError::NameNotFound)?;
    let type_line = name::find_type_line(&page.preamble, name_index);
    let index = LineIndex::new(&page.preamble);

    let mut record = MonsterRecord {
        name,
        type_line,
        ..Default::default()
    };

    let text = |field: Field| index.lookup(field).unwrap_or("").to_string();

    if let Some(raw) = index.lookup(Field::ArmorClass) {
        (record.armor_class, record.armor_notes) = stats::parse_count_with_note(raw);
    }
    if let Some(raw) = index.lookup(Field::HitPoints) {
        (record.hit_points, record.hit_dice) = stats::parse_count_with_note(raw);
    }
    record.speed = text(Field::Speed);
    record.saving_throws = text(Field::SavingThrows);
    record.skills = text(Field::Skills);
    record.damage_vulnerabilities = text(Field::DamageVulnerabilities);
    record.damage_resistances = text(Field::DamageResistances);
    record.damage_immunities = text(Field::DamageImmunities);
    record.condition_immunities = text(Field::ConditionImmunities);
    record.senses = text(Field::Senses);
    record.languages = text(Field::Languages);

    if let Some(general) = index.lookup(Field::Immunities).filter(|v| !v.is_empty()) {
        let routed = immunities::route(
            general,
            &mut record.damage_immunities,
            &mut record.condition_immunities,
        );
        debug!(?routed, value = general, "general immunities line");
    }

    if let Some(raw) = index.lookup(Field::Challenge) {
        let challenge = challenge::parse(raw);
        record.challenge_rating = challenge.rating;
        record.challenge_xp = challenge.xp;
        record.proficiency_bonus = challenge.proficiency_bonus;
    }
    // A dedicated Proficiency Bonus line overrides the PB token of the challenge line.
    if let Some(raw) = index.lookup(Field::ProficiencyBonus).filter(|v| !v.is_empty()) {
        record.proficiency_bonus = stats::signed_bonus(raw);
    }

    record.ability_scores = abilities::extract(&page.preamble);

    for kind in SectionKind::ALL {
        *record.section_mut(kind) = page.paragraphs(kind).to_vec();
    }

    let description_lines = page
        .section(SectionKind::Description)
        .map(|s| s.lines.as_slice())
        .unwrap_or(&[]);
    let found = provenance::extract(
        index
            .lines()
            .iter()
            .chain(description_lines)
            .map(String::as_str),
    );
    record
        .description
        .retain(|paragraph| !found.consumed.contains(paragraph));
    record.habitat = found.habitat;
    record.source = found.source;

    let missing: Vec<Field> = FIELD_LABELS
        .iter()
        .map(|(field, _)| *field)
        .filter(|field| index.lookup(*field).is_none())
        .collect();
    debug!(name = %record.name, ?missing, "stat block extracted");

    Ok(record)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sections::segment;
    use crate::parser::text::preprocess;

    fn run(md: &str) -> Result<MonsterRecord, ImportError> {
        extract(&segment(&preprocess(md)))
    }

    const HEADER: &str = "# [Test Beast](https://www.dndbeyond.com/monsters/1-test-beast)\nMedium Beast, Unaligned\n";

    #[test]
    fn dire_wolf_fixture() {
        let md = std::fs::read_to_string("tests/fixtures/dire-wolf.md").unwrap();
        let r = run(&md).unwrap();
        assert_eq!(r.name, "Dire Wolf");
        assert_eq!(r.type_line, "Large Beast, Unaligned");
        assert_eq!(r.armor_class, Some(14));
        assert_eq!(r.armor_notes, "natural armor");
        assert_eq!(r.hit_points, Some(37));
        assert_eq!(r.hit_dice, "5d10 + 10");
        assert_eq!(r.speed, "50 ft.");
        assert_eq!(r.skills, "Perception +3, Stealth +4");
        assert_eq!(r.senses, "Passive Perception 13");
        assert_eq!(r.languages, "--");
        assert_eq!(r.challenge_rating, "1");
        assert_eq!(r.challenge_xp, "200 XP");
        assert_eq!(r.proficiency_bonus, "+2");
        assert_eq!(r.habitat, "Forest Hill");
        assert_eq!(r.source, "Basic Rules (2014), pg. 123");
        assert!(r.traits[0].starts_with("Keen Hearing and Smell."));
        assert!(r.actions[0].contains("Bite. Melee Weapon Attack:"));
        assert!(r.description.is_empty());
    }

    #[test]
    fn name_required() {
        let err = run("Armor Class 12\nHit Points 9 (2d8)\n### Actions\n[Wolf](/monsters/1-wolf)").unwrap_err();
        assert!(matches!(err, ImportError::NameNotFound));
    }

    #[test]
    fn general_immunities_routed_to_damage() {
        let r = run(&format!("{HEADER}Immunities Poison, Fire\n")).unwrap();
        assert_eq!(r.damage_immunities, "Poison, Fire");
        assert!(r.condition_immunities.is_empty());
    }

    #[test]
    fn general_immunities_routed_to_condition() {
        let r = run(&format!("{HEADER}Immunities Poisoned, Charmed\n")).unwrap();
        assert!(r.damage_immunities.is_empty());
        assert_eq!(r.condition_immunities, "Poisoned, Charmed");
    }

    #[test]
    fn labeled_immunities_beat_general_line() {
        let r = run(&format!(
            "{HEADER}Immunities Cold\nDamage Immunities Fire\nCondition Immunities Frightened\n"
        ))
        .unwrap();
        assert_eq!(r.damage_immunities, "Fire");
        assert_eq!(r.condition_immunities, "Frightened");
    }

    #[test]
    fn comments_nav_link_before_name_keeps_stat_block() {
        let r = run(&format!("[Comments](#comments)\n{HEADER}Armor Class 12\n")).unwrap();
        assert_eq!(r.name, "Test Beast");
        assert_eq!(r.armor_class, Some(12));
    }

    #[test]
    fn proficiency_line_overrides_challenge_token() {
        let r = run(&format!("{HEADER}CR 5 (XP 1,800; PB +3)\nProficiency Bonus 4\n")).unwrap();
        assert_eq!(r.challenge_rating, "5");
        assert_eq!(r.challenge_xp, "XP 1,800");
        assert_eq!(r.proficiency_bonus, "+4");

        let r = run(&format!("{HEADER}CR 5 (XP 1,800; PB +3)\n")).unwrap();
        assert_eq!(r.proficiency_bonus, "+3");
    }

    #[test]
    fn missing_fields_degrade() {
        let r = run(HEADER).unwrap();
        assert_eq!(r.armor_class, None);
        assert_eq!(r.hit_points, None);
        assert!(r.speed.is_empty());
        assert!(r.challenge_rating.is_empty());
        assert_eq!(r.ability_scores.strength, None);
        assert!(r.traits.is_empty());
    }

    #[test]
    fn fields_after_first_heading_ignored() {
        let r = run(&format!("{HEADER}### Traits\nArmor Class 19\n")).unwrap();
        assert_eq!(r.armor_class, None);
        assert_eq!(r.traits, vec!["Armor Class 19"]);
    }

    #[test]
    fn provenance_in_description_is_lifted_out() {
        let r = run(&format!(
            "{HEADER}### Description\nA test beast.\n\nSource: Bestiary Vol. 2, page 9\n"
        ))
        .unwrap();
        assert_eq!(r.source, "Bestiary Vol. 2, page 9");
        assert_eq!(r.description, vec!["A test beast."]);
    }
}
