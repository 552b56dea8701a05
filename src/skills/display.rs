//! Text formatting of resolved levels for sheets and reports

use crate::skills::SkillLevel;

/// Level column text: the number, or "-" when the skill cannot be performed
pub fn format_level(level: &SkillLevel) -> String {
    if level.is_performable() {
        level.level.to_string()
    } else {
        "-".to_string()
    }
}

/// Relative level column text, e.g. "IQ+2" or "Ritual Magic-3"
pub fn format_relative_level(prefix: &str, level: &SkillLevel) -> String {
    if level.is_performable() {
        format!("{}{:+}", prefix, level.relative_level)
    } else {
        "-".to_string()
    }
}

/// Technique column text, e.g. "14/+2"
pub fn format_technique_level(level: &SkillLevel, modifier: i32) -> String {
    if level.level < 0 {
        return "-".to_string();
    }
    format!("{}/{:+}", level.level, level.relative_level + modifier)
}
