use serde::Serialize;

use crate::notes;
use crate::parser::sections::SectionKind;
use crate::tags;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AbilityScores {
    #[serde(rename = "str")]
    pub strength: Option<u32>,
    #[serde(rename = "dex")]
    pub dexterity: Option<u32>,
    #[serde(rename = "con")]
    pub constitution: Option<u32>,
    #[serde(rename = "int")]
    pub intelligence: Option<u32>,
    #[serde(rename = "wis")]
    pub wisdom: Option<u32>,
    #[serde(rename = "cha")]
    pub charisma: Option<u32>,
}

/// Everything recovered from one monster page. Unknown text fields are `""`,
/// unknown numbers `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterRecord {
    pub name: String,
    pub slug: String,
    pub reference_id: Option<String>,
    pub source_url: String,

    pub type_line: String,
    pub armor_class: Option<u32>,
    pub armor_notes: String,
    pub hit_points: Option<u32>,
    pub hit_dice: String,
    pub speed: String,
    pub ability_scores: AbilityScores,

    pub saving_throws: String,
    pub skills: String,
    pub damage_vulnerabilities: String,
    pub damage_resistances: String,
    pub damage_immunities: String,
    pub condition_immunities: String,
    pub senses: String,
    pub languages: String,

    pub challenge_rating: String,
    pub challenge_xp: String,
    pub proficiency_bonus: String,

    pub traits: Vec<String>,
    pub actions: Vec<String>,
    pub bonus_actions: Vec<String>,
    pub reactions: Vec<String>,
    pub legendary_actions: Vec<String>,
    pub mythic_actions: Vec<String>,
    pub lair_actions: Vec<String>,
    pub regional_effects: Vec<String>,
    /// Description paragraphs, minus any line lifted into `habitat` or `source`.
    pub description: Vec<String>,

    pub habitat: String,
    pub source: String,

    pub tags: Vec<String>,
    pub notes: String,
}

impl MonsterRecord {
    pub fn section(&self, kind: SectionKind) -> &[String] {
        match kind {
            SectionKind::Traits => &self.traits,
            SectionKind::Actions => &self.actions,
            SectionKind::BonusActions => &self.bonus_actions,
            SectionKind::Reactions => &self.reactions,
            SectionKind::LegendaryActions => &self.legendary_actions,
            SectionKind::MythicActions => &self.mythic_actions,
            SectionKind::LairActions => &self.lair_actions,
            SectionKind::RegionalEffects => &self.regional_effects,
            SectionKind::Description => &self.description,
        }
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut Vec<String> {
        match kind {
            SectionKind::Traits => &mut self.traits,
            SectionKind::Actions => &mut self.actions,
            SectionKind::BonusActions => &mut self.bonus_actions,
            SectionKind::Reactions => &mut self.reactions,
            SectionKind::LegendaryActions => &mut self.legendary_actions,
            SectionKind::MythicActions => &mut self.mythic_actions,
            SectionKind::LairActions => &mut self.lair_actions,
            SectionKind::RegionalEffects => &mut self.regional_effects,
            SectionKind::Description => &mut self.description,
        }
    }

    /// Recompute `tags` (merged with `manual`) and `notes` from the other fields.
    pub fn refresh_derived(&mut self, manual: &[String]) {
        self.tags = tags::build(self, manual);
        self.notes = notes::compile(self);
    }
}
