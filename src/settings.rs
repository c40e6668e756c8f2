use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Runtime settings, read from `BESTIARY_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Files parsed per parallel batch chunk.
    pub chunk_size: usize,
    /// Pretty-print JSON output.
    pub pretty: bool,
    pub compile_notes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_filter: "info".to_string(),
            chunk_size: 500,
            pretty: false,
            compile_notes: true,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(Environment::with_prefix("BESTIARY").try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}
