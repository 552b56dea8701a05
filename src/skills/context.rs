//! Character capabilities consumed by level resolution

use crate::skills::BonusAggregator;

/// Base scores of a character's attributes
pub trait AttributeSource {
    /// Current base score of an attribute (case-insensitive id), if the character has it
    fn base_level(&self, attribute: &str) -> Option<i32>;
}

/// A character's own skills, searched when something defaults from them
pub trait SkillSource {
    /// Highest level among skills named `name` (case-insensitive)
    ///
    /// An empty or absent specialization matches any specialization. With
    /// `require_points` only skills with points invested are considered.
    fn best_skill_level(
        &self,
        name: &str,
        specialization: Option<&str>,
        require_points: bool,
    ) -> Option<i32>;
}

/// Everything the resolvers need from a concrete character
pub trait CharacterView: AttributeSource + BonusAggregator + SkillSource {}

impl<T: AttributeSource + BonusAggregator + SkillSource + ?Sized> CharacterView for T {}

/// Whether a level is being resolved against a real character
#[derive(Clone, Copy)]
pub enum Context<'a> {
    Live(&'a dyn CharacterView),
    /// Library or template entries with no character behind them
    Template,
}

impl<'a> Context<'a> {
    pub fn live(view: &'a dyn CharacterView) -> Self {
        Context::Live(view)
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Context::Live(_))
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Context::Live(_) => f.write_str("Context::Live"),
            Context::Template => f.write_str("Context::Template"),
        }
    }
}
