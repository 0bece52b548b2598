//! Texture naming: archive entry parsing and map type rename rules.

mod filename;
mod rules;

pub use filename::{parse_texture_name, NameParseError, ParsedName};
pub use rules::{RenameRule, RenameRules};
