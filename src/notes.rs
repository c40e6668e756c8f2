use crate::parser::sections::SectionKind;
use crate::record::MonsterRecord;

/// Flatten a record into one readable block of text. Empty fields add nothing.
pub fn compile(record: &MonsterRecord) -> String {
    let mut blocks: Vec<String> = Vec::new();

    push(&mut blocks, &record.type_line);
    push(&mut blocks, &vitals_line(record));

    let labeled = [
        ("Speed", &record.speed),
        ("Saving Throws", &record.saving_throws),
        ("Skills", &record.skills),
        ("Damage Vulnerabilities", &record.damage_vulnerabilities),
        ("Damage Resistances", &record.damage_resistances),
        ("Damage Immunities", &record.damage_immunities),
        ("Condition Immunities", &record.condition_immunities),
        ("Senses", &record.senses),
        ("Languages", &record.languages),
    ];
    for (label, value) in labeled {
        if !value.is_empty() {
            blocks.push(format!("{} {}", label, value));
        }
    }

    if !record.challenge_rating.is_empty() {
        blocks.push(if record.challenge_xp.is_empty() {
            format!("Challenge {}", record.challenge_rating)
        } else {
            format!("Challenge {} ({})", record.challenge_rating, record.challenge_xp)
        });
    }
    if !record.proficiency_bonus.is_empty() {
        blocks.push(format!("Proficiency Bonus {}", record.proficiency_bonus));
    }

    // Description is last in SectionKind::ALL, after the action-style sections.
    for kind in SectionKind::ALL {
        let paragraphs = record.section(kind);
        if !paragraphs.is_empty() {
            blocks.push(format!("{}:\n{}", kind.label(), paragraphs.join("\n")));
        }
    }

    if !record.source.is_empty() {
        blocks.push(format!("Source: {}", record.source));
    }
    push(&mut blocks, &record.source_url);

    blocks.join("\n")
}

/// `AC 14 (natural armor) • HP 37 (5d10 + 10)`; empty when neither number is known.
fn vitals_line(record: &MonsterRecord) -> String {
    let ac = record
        .armor_class
        .map(|ac| with_note(format!("AC {}", ac), &record.armor_notes));
    let hp = record
        .hit_points
        .map(|hp| with_note(format!("HP {}", hp), &record.hit_dice));
    [ac, hp].into_iter().flatten().collect::<Vec<_>>().join(" • ")
}

fn with_note(head: String, note: &str) -> String {
    if note.is_empty() {
        head
    } else {
        format!("{} ({})", head, note)
    }
}

fn push(blocks: &mut Vec<String>, value: &str) {
    if !value.is_empty() {
        blocks.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf() -> MonsterRecord {
        MonsterRecord {
            name: "Dire Wolf".into(),
            source_url: "https://www.dndbeyond.com/monsters/16841-dire-wolf".into(),
            type_line: "Large Beast, Unaligned".into(),
            armor_class: Some(14),
            armor_notes: "natural armor".into(),
            hit_points: Some(37),
            hit_dice: "5d10 + 10".into(),
            speed: "50 ft.".into(),
            senses: "Passive Perception 13".into(),
            challenge_rating: "1".into(),
            challenge_xp: "200 XP".into(),
            proficiency_bonus: "+2".into(),
            traits: vec!["Keen Hearing and Smell. Advantage.".into(), "Pack Tactics. Advantage.".into()],
            actions: vec!["Bite. Melee Weapon Attack: +5 to hit.".into()],
            description: vec!["A big wolf.".into()],
            source: "Basic Rules (2014), pg. 123".into(),
            ..Default::default()
        }
    }

    #[test]
    fn full_layout() {
        let expected = "Large Beast, Unaligned\n\
            AC 14 (natural armor) • HP 37 (5d10 + 10)\n\
            Speed 50 ft.\n\
            Senses Passive Perception 13\n\
            Challenge 1 (200 XP)\n\
            Proficiency Bonus +2\n\
            Traits:\nKeen Hearing and Smell. Advantage.\nPack Tactics. Advantage.\n\
            Actions:\nBite. Melee Weapon Attack: +5 to hit.\n\
            Description:\nA big wolf.\n\
            Source: Basic Rules (2014), pg. 123\n\
            https://www.dndbeyond.com/monsters/16841-dire-wolf";
        assert_eq!(compile(&wolf()), expected);
    }

    #[test]
    fn partial_vitals() {
        let r = MonsterRecord {
            hit_points: Some(9),
            armor_notes: "ignored without a number".into(),
            ..Default::default()
        };
        assert_eq!(compile(&r), "HP 9");
    }

    #[test]
    fn empty_record_compiles_to_nothing() {
        assert_eq!(compile(&MonsterRecord::default()), "");
    }

    #[test]
    fn stable_for_equal_records() {
        assert_eq!(compile(&wolf()), compile(&wolf().clone()));
    }
}
