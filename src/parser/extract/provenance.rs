use std::sync::LazyLock;

use regex::Regex;

static PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(?:\bpg\.|\bpage)\s*\d+").unwrap());
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\d{4}\)").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    pub habitat: String,
    pub source: String,
    /// Lines that produced the values above, as they appeared.
    pub consumed: Vec<String>,
}

/// Scan candidate lines in document order for `Habitat:` and the source credit.
pub fn extract<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Provenance {
    let mut found = Provenance::default();
    let mut habitat_done = false;
    let mut source_done = false;

    for line in candidates {
        if habitat_done && source_done {
            break;
        }
        let line = line.trim();
        if let Some(value) = strip_label(line, "habitat:") {
            if !habitat_done {
                found.habitat = value.to_string();
                found.consumed.push(line.to_string());
                habitat_done = true;
            }
            continue;
        }
        if source_done {
            continue;
        }
        let source = match strip_label(line, "source:") {
            Some(value) => Some(value),
            None if PAGE_RE.is_match(line) || YEAR_RE.is_match(line) => Some(line),
            None => None,
        };
        if let Some(value) = source {
            found.source = value.to_string();
            found.consumed.push(line.to_string());
            source_done = true;
        }
    }
    found
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label)
        .then(|| line[label.len()..].trim())
}
