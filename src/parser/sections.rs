use std::collections::BTreeMap;

use super::text::{is_image_line, strip_formatting};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Traits,
    Actions,
    BonusActions,
    Reactions,
    LegendaryActions,
    MythicActions,
    LairActions,
    RegionalEffects,
    Description,
}

impl SectionKind {
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Traits,
        SectionKind::Actions,
        SectionKind::BonusActions,
        SectionKind::Reactions,
        SectionKind::LegendaryActions,
        SectionKind::MythicActions,
        SectionKind::LairActions,
        SectionKind::RegionalEffects,
        SectionKind::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Traits => "Traits",
            SectionKind::Actions => "Actions",
            SectionKind::BonusActions => "Bonus Actions",
            SectionKind::Reactions => "Reactions",
            SectionKind::LegendaryActions => "Legendary Actions",
            SectionKind::MythicActions => "Mythic Actions",
            SectionKind::LairActions => "Lair Actions",
            SectionKind::RegionalEffects => "Regional Effects",
            SectionKind::Description => "Description",
        }
    }

    /// `### Bonus Actions` → `BonusActions`. Only exact label matches count.
    pub fn from_heading(line: &str) -> Option<SectionKind> {
        let text = line.trim().trim_start_matches('#').trim().to_lowercase();
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.label().to_lowercase() == text)
    }
}

/// One narrative section: its stripped content lines and the paragraphs built from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub lines: Vec<String>,
    pub paragraphs: Vec<String>,
}

/// Page lines split into the stat-block preamble and the narrative sections.
#[derive(Debug, Clone, Default)]
pub struct Segmented {
    pub preamble: Vec<String>,
    sections: BTreeMap<SectionKind, Section>,
}

impl Segmented {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.get(&kind)
    }

    /// Paragraphs of `kind`, empty when the page has no such heading.
    pub fn paragraphs(&self, kind: SectionKind) -> &[String] {
        self.sections
            .get(&kind)
            .map(|s| s.paragraphs.as_slice())
            .unwrap_or(&[])
    }

    pub fn kinds(&self) -> impl Iterator<Item = SectionKind> + '_ {
        self.sections.keys().copied()
    }
}

/// Split preprocessed lines at recognized headings.
pub fn segment(lines: &[String]) -> Segmented {
    let mut headings: Vec<(usize, SectionKind)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| SectionKind::from_heading(line).map(|kind| (i, kind)))
        .collect();
    headings.sort_by_key(|(i, _)| *i);

    let preamble_end = headings.first().map(|(i, _)| *i).unwrap_or(lines.len());
    let mut sections: BTreeMap<SectionKind, Section> = BTreeMap::new();

    for (n, (start, kind)) in headings.iter().enumerate() {
        let end = headings.get(n + 1).map(|(i, _)| *i).unwrap_or(lines.len());
        let built = build_section(&lines[start + 1..end]);
        // A repeated heading continues the same section.
        let entry = sections.entry(*kind).or_default();
        entry.lines.extend(built.lines);
        entry.paragraphs.extend(built.paragraphs);
    }

    Segmented {
        preamble: lines[..preamble_end].to_vec(),
        sections,
    }
}

/// Blank lines separate paragraphs; image lines vanish without breaking one.
fn build_section(run: &[String]) -> Section {
    let stripped: Vec<String> = run
        .iter()
        .filter(|l| !is_image_line(l))
        .map(|l| strip_formatting(l))
        .collect();

    let (mut paragraphs, pending) = stripped.iter().fold(
        (Vec::new(), Vec::<&str>::new()),
        |(mut paragraphs, mut pending), line| {
            if line.is_empty() {
                if !pending.is_empty() {
                    paragraphs.push(pending.join(" "));
                    pending.clear();
                }
            } else {
                pending.push(line.as_str());
            }
            (paragraphs, pending)
        },
    );
    if !pending.is_empty() {
        paragraphs.push(pending.join(" "));
    }

    Section {
        lines: stripped.into_iter().filter(|l| !l.is_empty()).collect(),
        paragraphs,
    }
}

// ── Tests ──
