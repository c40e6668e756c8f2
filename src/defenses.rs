//! Fixed catalog of damage types and conditions, plus the helpers that map
//! free-text defense lists (`"fire, cold; poisoned"`) onto it and back.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefenseCategory {
    Damage,
    Condition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefenseOption {
    pub value: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub category: DefenseCategory,
}

const fn damage(value: &'static str, label: &'static str, icon: &'static str, color: &'static str) -> DefenseOption {
    DefenseOption { value, label, icon, color, category: DefenseCategory::Damage }
}

const fn condition(value: &'static str, label: &'static str, icon: &'static str, color: &'static str) -> DefenseOption {
    DefenseOption { value, label, icon, color, category: DefenseCategory::Condition }
}

static CATALOG: [DefenseOption; 28] = [
    damage("acid", "Acid", "flask-conical", "#84cc16"),
    damage("bludgeoning", "Bludgeoning", "hammer", "#78716c"),
    damage("cold", "Cold", "snowflake", "#38bdf8"),
    damage("fire", "Fire", "flame", "#f97316"),
    damage("force", "Force", "sparkles", "#a855f7"),
    damage("lightning", "Lightning", "zap", "#facc15"),
    damage("necrotic", "Necrotic", "skull", "#4b5563"),
    damage("piercing", "Piercing", "crosshair", "#94a3b8"),
    damage("poison", "Poison", "droplet", "#22c55e"),
    damage("psychic", "Psychic", "brain", "#ec4899"),
    damage("radiant", "Radiant", "sun", "#fde047"),
    damage("slashing", "Slashing", "sword", "#64748b"),
    damage("thunder", "Thunder", "volume-2", "#6366f1"),
    condition("blinded", "Blinded", "eye-off", "#57534e"),
    condition("charmed", "Charmed", "heart", "#f472b6"),
    condition("deafened", "Deafened", "ear-off", "#a8a29e"),
    condition("exhaustion", "Exhaustion", "battery-low", "#d97706"),
    condition("frightened", "Frightened", "ghost", "#7c3aed"),
    condition("grappled", "Grappled", "hand", "#b45309"),
    condition("incapacitated", "Incapacitated", "ban", "#dc2626"),
    condition("invisible", "Invisible", "eye", "#cbd5e1"),
    condition("paralyzed", "Paralyzed", "lock", "#0ea5e9"),
    condition("petrified", "Petrified", "mountain", "#6b7280"),
    condition("poisoned", "Poisoned", "flask-round", "#16a34a"),
    condition("prone", "Prone", "arrow-down", "#92400e"),
    condition("restrained", "Restrained", "link", "#9a3412"),
    condition("stunned", "Stunned", "star", "#eab308"),
    condition("unconscious", "Unconscious", "moon", "#1e3a8a"),
];

pub fn catalog() -> &'static [DefenseOption] {
    &CATALOG
}

/// Catalog values of every damage type, in catalog order.
pub fn damage_types() -> impl Iterator<Item = &'static str> {
    CATALOG
        .iter()
        .filter(|o| o.category == DefenseCategory::Damage)
        .map(|o| o.value)
}

/// Look up one token by value or label, ignoring case and surrounding punctuation.
pub fn find(token: &str) -> Option<&'static DefenseOption> {
    let key = normalize_token(token);
    if key.is_empty() {
        return None;
    }
    CATALOG
        .iter()
        .find(|o| o.value == key || o.label.to_lowercase() == key)
}

/// Result of mapping a free-text list against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefenseSelection {
    pub options: Vec<&'static DefenseOption>,
    /// Pieces that matched nothing, kept verbatim for display.
    pub unmatched: Vec<String>,
}

/// `"Bludgeoning, Piercing, and Slashing from Nonmagical Attacks; Poisoned"` →
/// bludgeoning + piercing + poisoned, with the qualified phrase left unmatched.
pub fn parse_defense_list(text: &str) -> DefenseSelection {
    let mut selection = DefenseSelection::default();
    for piece in text.split([',', ';']) {
        let piece = strip_conjunction(piece.trim());
        if piece.is_empty() {
            continue;
        }
        match find(piece) {
            Some(option) => {
                if !selection.options.iter().any(|o| o.value == option.value) {
                    selection.options.push(option);
                }
            }
            None => selection.unmatched.push(piece.to_string()),
        }
    }
    selection
}

/// Comma-joined labels followed by any unmatched free text.
pub fn format_defense_list(selection: &DefenseSelection) -> String {
    selection
        .options
        .iter()
        .map(|o| o.label.to_string())
        .chain(selection.unmatched.iter().cloned())
        .collect::<Vec<_>>()
        .join(", ")
}

fn strip_conjunction(piece: &str) -> &str {
    for prefix in ["and ", "or "] {
        if let Some(head) = piece.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                return piece[prefix.len()..].trim();
            }
        }
    }
    piece
}

fn normalize_token(token: &str) -> String {
    token
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_shape() {
        assert_eq!(damage_types().count(), 13);
        assert_eq!(
            catalog().iter().filter(|o| o.category == DefenseCategory::Condition).count(),
            15
        );
        assert!(damage_types().any(|d| d == "thunder"));
    }

    #[test]
    fn find_by_value_or_label() {
        assert_eq!(find("Fire").map(|o| o.value), Some("fire"));
        assert_eq!(find("  poisoned. ").map(|o| o.category), Some(DefenseCategory::Condition));
        assert!(find("nonmagical").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn parse_mixed_list() {
        let sel = parse_defense_list("Bludgeoning, Piercing, and Slashing from Nonmagical Attacks; Poisoned");
        let values: Vec<_> = sel.options.iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["bludgeoning", "piercing", "poisoned"]);
        assert_eq!(sel.unmatched, vec!["Slashing from Nonmagical Attacks"]);
    }

    #[test]
    fn duplicates_collapse() {
        let sel = parse_defense_list("fire, Fire; FIRE and cold");
        assert_eq!(sel.options.len(), 1);
        assert_eq!(sel.unmatched, vec!["FIRE and cold"]);
    }

    #[test]
    fn format_round_trips_display() {
        let sel = parse_defense_list("cold, and fire; charmed, frightened");
        assert_eq!(format_defense_list(&sel), "Cold, Fire, Charmed, Frightened");
        assert_eq!(format_defense_list(&DefenseSelection::default()), "");
    }
}
