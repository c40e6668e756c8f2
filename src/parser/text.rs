use std::sync::LazyLock;

use regex::Regex;

static INLINE_LINKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());
static COMMENTS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^comments(\s*\(\d+\))?$").unwrap());

/// Banners the page renderer leaves behind as standalone lines.
const NOISE_LINES: &[&str] = &["dismiss", "dismiss banner", "close banner", "got it"];
const EMPHASIS_CHARS: &[char] = &['*', '_', '`'];

/// A markdown link found on a line: `[text](url)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// Split raw page text into lines, dropping dismissal banners and everything
/// from the comments trailer onward. Image lines survive; consumers skip them.
pub fn preprocess(markdown: &str) -> Vec<String> {
    markdown
        .replace("\r\n", "\n")
        .split('\n')
        .map(|l| l.trim_end().to_string())
        .take_while(|l| !is_comments_trailer(l))
        .filter(|l| !is_noise_line(l))
        .collect()
}

/// Replace links with their labels, drop emphasis markers and collapse whitespace.
pub fn strip_formatting(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for caps in INLINE_LINKS_RE.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        let before = &line[last..whole.start()];
        out.push_str(before);
        // Keep the label from gluing onto the preceding word.
        if line[..whole.start()]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace())
        {
            out.push(' ');
        }
        out.push_str(&caps[1]);
        last = whole.end();
    }
    out.push_str(&line[last..]);

    out.replace(EMPHASIS_CHARS, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// All `[text](url)` links on a line, in order.
pub fn links(line: &str) -> Vec<Link> {
    INLINE_LINKS_RE
        .captures_iter(line)
        .map(|caps| Link {
            text: caps[1].to_string(),
            url: caps[2].trim().to_string(),
        })
        .collect()
}

pub fn is_image_line(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("![") || t.starts_with("[![")
}

pub fn is_noise_line(line: &str) -> bool {
    let lower = strip_formatting(line).to_lowercase();
    NOISE_LINES.contains(&lower.as_str())
}

/// A bare `Comments` / `Comments (N)` line or heading. Links never count.
fn is_comments_trailer(line: &str) -> bool {
    if INLINE_LINKS_RE.is_match(line) {
        return false;
    }
    let lower = strip_formatting(line.trim_start().trim_start_matches('#')).to_lowercase();
    COMMENTS_RE.is_match(&lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_label_kept() {
        assert_eq!(strip_formatting("[Dire Wolf](https://x.test/monsters/1-dire-wolf)"), "Dire Wolf");
    }

    #[test]
    fn link_after_word_gets_space() {
        assert_eq!(
            strip_formatting("Hit:[poisoned](https://x.test/conditions#Poisoned) target"),
            "Hit: poisoned target"
        );
        assert_eq!(
            strip_formatting("is [poisoned](https://x.test/conditions#Poisoned)."),
            "is poisoned."
        );
    }

    #[test]
    fn emphasis_and_whitespace() {
        assert_eq!(
            strip_formatting("  ***Bite.***   _Melee Weapon Attack:_  `+5`  to hit "),
            "Bite. Melee Weapon Attack: +5 to hit"
        );
    }

    #[test]
    fn image_lines() {
        assert!(is_image_line("![Dire Wolf](https://x.test/wolf.jpg)"));
        assert!(is_image_line("  [![Art](https://x.test/a.png)](https://x.test/a)"));
        assert!(!is_image_line("[Dire Wolf](https://x.test/monsters/1-dire-wolf)"));
    }

    #[test]
    fn noise_lines() {
        assert!(is_noise_line("Dismiss"));
        assert!(is_noise_line("**Got it**"));
        assert!(!is_noise_line("Dismissive Glare."));
    }

    #[test]
    fn preprocess_cuts_comments_trailer() {
        let md = "Armor Class 14\r\nDismiss\r\nHit Points 37\n\n## Comments (12)\nnice wolf";
        let lines = preprocess(md);
        assert_eq!(lines, vec!["Armor Class 14", "Hit Points 37", ""]);
    }

    #[test]
    fn comments_nav_link_is_not_the_trailer() {
        let md = "[Comments](#comments)\n# Dire Wolf\nArmor Class 14\n**Comments**\nnice wolf";
        let lines = preprocess(md);
        assert_eq!(lines, vec!["[Comments](#comments)", "# Dire Wolf", "Armor Class 14"]);
    }

    #[test]
    fn links_in_order() {
        let found = links("[a](https://one) and [b]( https://two )");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "a");
        assert_eq!(found[1].url, "https://two");
    }
}
