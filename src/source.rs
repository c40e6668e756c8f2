use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::error::ImportError;

pub const CANONICAL_ORIGIN: &str = "https://www.dndbeyond.com";
const ACCEPTED_HOSTS: &[&str] = &["www.dndbeyond.com", "dndbeyond.com"];
const MONSTER_SEGMENT: &str = "monsters";

static BASE_URL: LazyLock<Url> = LazyLock::new(|| Url::parse(CANONICAL_ORIGIN).unwrap());
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)-(.*)$").unwrap());
static NON_SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").unwrap());
static HYPHEN_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Canonical identity of a monster page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSource {
    pub normalized_url: String,
    pub slug: String,
    pub reference_id: Option<String>,
}

/// Resolve `raw` against the canonical origin and reduce it to
/// `https://www.dndbeyond.com/<segments>` with no query, fragment or trailing slash.
pub fn normalize(raw: &str) -> Result<NormalizedSource, ImportError> {
    let input = raw.trim();
    let url = BASE_URL.join(input).map_err(|source| ImportError::InvalidUrl {
        input: input.to_string(),
        source,
    })?;

    let host = url.host_str().unwrap_or("").to_ascii_lowercase();
    if !ACCEPTED_HOSTS.contains(&host.as_str()) {
        return Err(ImportError::UnsupportedSource {
            url: input.to_string(),
            reason: "host is not dndbeyond.com",
        });
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    // The collection segment must be followed by at least one detail segment.
    let has_monster_path = segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .any(|seg| seg.eq_ignore_ascii_case(MONSTER_SEGMENT));
    let Some(candidate) = segments.last().filter(|_| has_monster_path) else {
        return Err(ImportError::UnsupportedSource {
            url: input.to_string(),
            reason: "path has no /monsters/<name> segment",
        });
    };

    let candidate = candidate.replace("%20", " ");
    let (slug, reference_id) = match REFERENCE_RE.captures(&candidate) {
        Some(caps) => (sanitize_slug(&caps[2]), Some(caps[1].to_string())),
        None => (sanitize_slug(&candidate), None),
    };

    Ok(NormalizedSource {
        normalized_url: format!("{}/{}", CANONICAL_ORIGIN, segments.join("/")),
        slug,
        reference_id,
    })
}

/// Lowercase, collapse anything outside `[a-z0-9-]` to single hyphens, trim hyphens.
pub fn sanitize_slug(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let replaced = NON_SLUG_RE.replace_all(&lower, "-");
    HYPHEN_RUN_RE
        .replace_all(&replaced, "-")
        .trim_matches('-')
        .to_string()
}
