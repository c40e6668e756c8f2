pub mod extract;
pub mod sections;
pub mod text;

use tracing::debug;

use crate::error::ImportError;
use crate::notes;
use crate::record::MonsterRecord;
use crate::source;
use crate::tags;

/// Caller-supplied knobs for one import.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// User-entered tags, merged ahead of the synthesized ones.
    pub manual_tags: Vec<String>,
    /// When false, `notes` is left empty for the caller to compile later.
    pub compile_notes: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            manual_tags: Vec::new(),
            compile_notes: true,
        }
    }
}

/// Four-pass pipeline: URL → lines → sections → record, then tags and notes.
pub fn parse_monster(markdown: &str, source_url: &str) -> Result<MonsterRecord, ImportError> {
    parse_monster_with(markdown, source_url, &ImportOptions::default())
}

pub fn parse_monster_with(
    markdown: &str,
    source_url: &str,
    options: &ImportOptions,
) -> Result<MonsterRecord, ImportError> {
    if markdown.trim().is_empty() {
        return Err(ImportError::EmptyContent);
    }
    let source = source::normalize(source_url)?;

    let lines = text::preprocess(markdown);
    let page = sections::segment(&lines);
    debug!(
        slug = %source.slug,
        lines = lines.len(),
        preamble = page.preamble.len(),
        sections = ?page.kinds().collect::<Vec<_>>(),
        "segmented page"
    );

    let mut record = extract::extract(&page)?;
    record.slug = source.slug;
    record.reference_id = source.reference_id;
    record.source_url = source.normalized_url;

    record.tags = tags::build(&record, &options.manual_tags);
    if options.compile_notes {
        record.notes = notes::compile(&record);
    }
    Ok(record)
}

// ── Tests ──
