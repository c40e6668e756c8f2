//! Turn a rendered D&D Beyond monster page into a typed [`MonsterRecord`].
//!
//! The crate never fetches anything: callers hand over page text that was
//! already retrieved, plus the URL it came from.

pub mod defenses;
pub mod error;
pub mod notes;
pub mod parser;
pub mod record;
pub mod source;
pub mod tags;

pub use error::ImportError;
pub use parser::{parse_monster, parse_monster_with, ImportOptions};
pub use record::{AbilityScores, MonsterRecord};
pub use source::{normalize, NormalizedSource};
