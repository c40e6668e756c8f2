use thiserror::Error;

/// Failures that abort an import. Field-level gaps never surface here; they
/// degrade to empty strings or `None` on the record instead.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported source {url}: {reason}")]
    UnsupportedSource { url: String, reason: &'static str },

    #[error("Page content is empty")]
    EmptyContent,

    #[error("No monster name link found before the stat block ends")]
    NameNotFound,
}

impl ImportError {
    /// Short stable identifier, used in logs and batch summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            ImportError::InvalidUrl { .. } => "invalid_url",
            ImportError::UnsupportedSource { .. } => "unsupported_source",
            ImportError::EmptyContent => "empty_content",
            ImportError::NameNotFound => "name_not_found",
        }
    }
}
