//! Resolved skill levels and their tooltips

use serde::{Deserialize, Serialize};

/// Level reported when a skill cannot be performed at all
pub const CANNOT_PERFORM: i32 = -1;

/// Final level of a skill or spell, with the explanation of how it was reached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub level: i32,
    /// Level relative to the governing attribute (or default)
    pub relative_level: i32,
    /// One line per contributing bonus, in the order they were applied
    pub tooltip: String,
}

impl SkillLevel {
    pub fn new(level: i32, relative_level: i32, tooltip: String) -> Self {
        Self {
            level,
            relative_level,
            tooltip,
        }
    }

    /// The sentinel result: no character, no points, or nothing to default from
    pub fn cannot_perform() -> Self {
        Self {
            level: CANNOT_PERFORM,
            relative_level: 0,
            tooltip: String::new(),
        }
    }

    pub fn is_performable(&self) -> bool {
        self.level != CANNOT_PERFORM
    }

    /// Add a bonus amount to both the level and the relative level
    pub fn apply_bonus(&mut self, amount: i32, explanation: &str) {
        self.level += amount;
        self.relative_level += amount;
        append_tooltip(&mut self.tooltip, explanation);
    }
}

/// Append explanation lines to a tooltip, one per line
pub fn append_tooltip(tooltip: &mut String, explanation: &str) {
    if explanation.is_empty() {
        return;
    }
    if !tooltip.is_empty() {
        tooltip.push('\n');
    }
    tooltip.push_str(explanation);
}
