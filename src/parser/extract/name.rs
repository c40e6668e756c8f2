use std::sync::LazyLock;

use regex::Regex;

use crate::parser::text::{is_image_line, links, strip_formatting};

static MONSTER_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/monsters/[^/?#\s]+").unwrap());

/// Link labels that point at the monster page without being its name.
const NAV_ARTIFACTS: &[&str] = &["skip to content", "skip to main content", "monsters", "back to monsters"];

/// Index and label of the first line linking to a monster detail page.
pub fn find_name(lines: &[String]) -> Option<(usize, String)> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !is_image_line(line))
        .find_map(|(i, line)| {
            links(line).into_iter().find_map(|link| {
                if !MONSTER_LINK_RE.is_match(&link.url) {
                    return None;
                }
                let label = strip_formatting(&link.text);
                let lower = label.to_lowercase();
                if label.is_empty() || NAV_ARTIFACTS.contains(&lower.as_str()) {
                    return None;
                }
                Some((i, label))
            })
        })
}

/// First meaningful line after the name: `Large Beast, Unaligned`.
pub fn find_type_line(lines: &[String], name_index: usize) -> String {
    lines
        .iter()
        .skip(name_index + 1)
        .filter(|l| !is_image_line(l))
        .map(|l| strip_formatting(l))
        .find(|l| !l.is_empty() && !is_setext_underline(l))
        .unwrap_or_default()
}

fn is_setext_underline(line: &str) -> bool {
    line.chars().all(|c| c == '=') || line.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(md: &str) -> Vec<String> {
        md.lines().map(str::to_string).collect()
    }

    #[test]
    fn skips_navigation_links() {
        let page = lines(
            "[Skip to content](https://www.dndbeyond.com/monsters/16841-dire-wolf#content)\n[Monsters](https://www.dndbeyond.com/monsters)\n# [Dire Wolf](https://www.dndbeyond.com/monsters/16841-dire-wolf)\n\nLarge Beast, Unaligned",
        );
        let (idx, name) = find_name(&page).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(name, "Dire Wolf");
        assert_eq!(find_type_line(&page, idx), "Large Beast, Unaligned");
    }

    #[test]
    fn ignores_non_monster_links_and_images() {
        let page = lines(
            "[Basic Rules](https://www.dndbeyond.com/sources/basic-rules)\n[![Art](https://x.test/a.png)](https://www.dndbeyond.com/monsters/1-owlbear)\n**[Owlbear](/monsters/16977-owlbear)**\n===\n*Large Monstrosity, Unaligned*",
        );
        let (idx, name) = find_name(&page).unwrap();
        assert_eq!((idx, name.as_str()), (2, "Owlbear"));
        assert_eq!(find_type_line(&page, idx), "Large Monstrosity, Unaligned");
    }

    #[test]
    fn none_without_monster_link() {
        assert!(find_name(&lines("Dire Wolf\nLarge Beast")).is_none());
    }
}
