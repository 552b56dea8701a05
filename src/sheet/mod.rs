//! Character sheets: the concrete characters levels are resolved against

pub mod character;
mod loader;

pub use character::{Character, RitualSpellEntry, SkillEntry, SpellEntry};
pub use loader::{load_sheet, parse_sheet};
