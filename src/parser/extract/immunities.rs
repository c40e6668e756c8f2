use crate::defenses;

/// Where an unqualified "Immunities" line belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmunityRoute {
    Damage,
    Condition,
}

/// Damage when any word of `text` is a damage type, condition otherwise.
/// Whole-word matching keeps "Poisoned" out of the damage branch.
pub fn classify(text: &str) -> ImmunityRoute {
    let lower = text.to_lowercase();
    let has_damage_word = lower
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .any(|word| defenses::damage_types().any(|d| d == word));
    if has_damage_word {
        ImmunityRoute::Damage
    } else {
        ImmunityRoute::Condition
    }
}

/// Fill the matching field from a general "Immunities" value. Labeled
/// "Damage Immunities" / "Condition Immunities" lines already in place win.
pub fn route(general: &str, damage: &mut String, condition: &mut String) -> Option<ImmunityRoute> {
    let target = classify(general);
    let slot = match target {
        ImmunityRoute::Damage => damage,
        ImmunityRoute::Condition => condition,
    };
    if !slot.is_empty() {
        return None;
    }
    *slot = general.to_string();
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_branch() {
        assert_eq!(classify("Fire, Poison"), ImmunityRoute::Damage);
        assert_eq!(classify("Poison; Poisoned"), ImmunityRoute::Damage);
    }

    #[test]
    fn condition_branch() {
        assert_eq!(classify("Poisoned, Frightened"), ImmunityRoute::Condition);
        assert_eq!(classify("Charmed"), ImmunityRoute::Condition);
    }

    #[test]
    fn routes_into_empty_slot() {
        let (mut dmg, mut cond) = (String::new(), String::new());
        assert_eq!(route("Cold", &mut dmg, &mut cond), Some(ImmunityRoute::Damage));
        assert_eq!(dmg, "Cold");
        assert!(cond.is_empty());
    }

    #[test]
    fn labeled_value_wins() {
        let mut dmg = "fire".to_string();
        let mut cond = String::new();
        assert_eq!(route("Cold", &mut dmg, &mut cond), None);
        assert_eq!(dmg, "fire");
        assert!(cond.is_empty());
    }
}
