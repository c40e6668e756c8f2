use std::sync::LazyLock;

use regex::Regex;

use super::stats::signed_bonus;

static RATING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\S+?)\s*\((.*)\)\s*$").unwrap());
static XP_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bxp\s*(\d+(?:,\d{3})*)").unwrap());
static XP_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+(?:,\d{3})*)\s*xp\b").unwrap());
static PB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^pb\s*([+-]?\s*\d+)").unwrap());

/// Parts of a `Challenge 1 (200 XP)` / `CR 5 (XP 1,800; PB +3)` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Challenge {
    pub rating: String,
    /// `XP 1,800` for the modern token, `200 XP` for the legacy one.
    pub xp: String,
    /// Signed, e.g. `+2`. Empty when the line carries no PB token.
    pub proficiency_bonus: String,
}

pub fn parse(raw: &str) -> Challenge {
    let raw = raw.trim();
    let Some(caps) = RATING_RE.captures(raw) else {
        return Challenge {
            rating: raw.to_string(),
            ..Default::default()
        };
    };

    let mut challenge = Challenge {
        rating: caps[1].to_string(),
        ..Default::default()
    };
    for part in caps[2].split([';', '•']).map(str::trim) {
        if challenge.xp.is_empty() {
            if let Some(xp) = parse_xp(part) {
                challenge.xp = xp;
                continue;
            }
        }
        if challenge.proficiency_bonus.is_empty() {
            if let Some(pb) = PB_RE.captures(part) {
                challenge.proficiency_bonus = signed_bonus(&pb[1]);
            }
        }
    }
    challenge
}

fn parse_xp(part: &str) -> Option<String> {
    if let Some(caps) = XP_PREFIX_RE.captures(part) {
        return Some(format!("XP {}", &caps[1]));
    }
    XP_SUFFIX_RE.captures(part).map(|caps| format!("{} XP", &caps[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_line() {
        let c = parse("1 (200 XP)");
        assert_eq!(c.rating, "1");
        assert_eq!(c.xp, "200 XP");
        assert_eq!(c.proficiency_bonus, "");
    }

    #[test]
    fn modern_line_with_pb() {
        let c = parse("5 (XP 1,800; PB +3)");
        assert_eq!(c.rating, "5");
        assert_eq!(c.xp, "XP 1,800");
        assert_eq!(c.proficiency_bonus, "+3");
    }

    #[test]
    fn bullet_separator_and_unsigned_pb() {
        let c = parse("1/4 (xp 50 • PB 2)");
        assert_eq!(c.rating, "1/4");
        assert_eq!(c.xp, "XP 50");
        assert_eq!(c.proficiency_bonus, "+2");
    }

    #[test]
    fn lair_variant_takes_first_xp() {
        let c = parse("17 (XP 18,000, or 20,000 in lair; PB +6)");
        assert_eq!(c.xp, "XP 18,000");
        assert_eq!(c.proficiency_bonus, "+6");
    }

    #[test]
    fn lowercase_modern_token_is_uppercased() {
        assert_eq!(parse("2 (xp 450)").xp, "XP 450");
        assert_eq!(parse("2 (450 xp)").xp, "450 XP");
    }

    #[test]
    fn no_parenthetical() {
        let c = parse("—");
        assert_eq!(c.rating, "—");
        assert!(c.xp.is_empty());
    }
}
