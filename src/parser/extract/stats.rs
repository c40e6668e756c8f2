use std::sync::LazyLock;

use regex::Regex;

static COUNT_NOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\s*(?:\((.*)\))?$").unwrap());
static LEADING_INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\+?(\d+)").unwrap());
static SIGNED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([+-]?)\s*(\d+)$").unwrap());

/// `"14 (natural armor)"` → `(Some(14), "natural armor")`.
///
/// Anything else keeps the whole raw text as the note and takes the leading
/// integer, if any, on its own.
pub fn parse_count_with_note(raw: &str) -> (Option<u32>, String) {
    let raw = raw.trim();
    if let Some(caps) = COUNT_NOTE_RE.captures(raw) {
        let value = caps[1].parse::<u32>().ok();
        let note = caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
        return (value, note);
    }
    (leading_int(raw), raw.to_string())
}

/// Base-10 integer at the start of `raw`; negative or overflowing values give `None`.
pub fn leading_int(raw: &str) -> Option<u32> {
    LEADING_INT_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

/// `"2"` / `"+ 2"` → `"+2"`; unrecognized text passes through trimmed.
pub fn signed_bonus(raw: &str) -> String {
    let raw = raw.trim();
    match SIGNED_RE.captures(raw) {
        Some(caps) => {
            let sign = if &caps[1] == "-" { "-" } else { "+" };
            format!("{}{}", sign, &caps[2])
        }
        None => raw.to_string(),
    }
}
