//! In-memory character sheet
//!
//! Holds attributes, skills, spells and bonuses, and answers the attribute,
//! skill and bonus lookups the resolvers make.

use crate::core::error::Result;
use crate::skills::{
    resolve_ritual_magic_level, resolve_skill_level, resolve_spell_level, skill_bonus_keys,
    try_resolve_level, AttributeSource, BonusAggregator, BonusContribution, BonusKey,
    BonusRegistry, Context, Difficulty, RitualMagicQuery, SkillLevel, SkillSource,
    DEFAULT_RITUAL_SKILL,
};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

fn default_attribute() -> String {
    "iq".to_string()
}

fn default_ritual_skill() -> String {
    DEFAULT_RITUAL_SKILL.to_string()
}

/// A directly trained skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default = "default_attribute")]
    pub attribute: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl SkillEntry {
    pub fn new(name: &str, attribute: &str, difficulty: Difficulty, points: i32) -> Self {
        Self {
            name: name.to_string(),
            specialization: None,
            attribute: attribute.to_string(),
            difficulty,
            points,
            categories: Vec::new(),
        }
    }

    pub fn with_specialization(mut self, specialization: &str) -> Self {
        self.specialization = Some(specialization.to_string());
        self
    }

    /// Display name, e.g. "Ritual Magic (Fire)"
    pub fn full_name(&self) -> String {
        match self.specialization.as_deref() {
            Some(s) if !s.is_empty() => format!("{} ({})", self.name, s),
            _ => self.name.clone(),
        }
    }

    pub fn resolve(&self, context: &Context<'_>) -> Result<SkillLevel> {
        resolve_skill_level(
            context,
            &self.name,
            self.specialization.as_deref(),
            &self.attribute,
            self.difficulty,
            self.points,
            &self.categories,
        )
    }

    /// Like [`SkillEntry::resolve`], but `None` when the skill cannot be performed
    pub fn try_resolve(&self, context: &Context<'_>) -> Result<Option<SkillLevel>> {
        let keys = skill_bonus_keys(&self.name, self.specialization.as_deref());
        try_resolve_level(
            context,
            &self.attribute,
            self.points,
            self.difficulty,
            &keys,
            &self.categories,
        )
    }
}

/// A spell learned directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEntry {
    pub name: String,
    #[serde(default)]
    pub colleges: Vec<String>,
    #[serde(default)]
    pub power_source: String,
    #[serde(default = "default_attribute")]
    pub attribute: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl SpellEntry {
    pub fn resolve(&self, context: &Context<'_>) -> Result<SkillLevel> {
        resolve_spell_level(
            context,
            &self.name,
            &self.colleges,
            &self.power_source,
            &self.attribute,
            self.difficulty,
            self.points,
            &self.categories,
        )
    }
}

/// A spell whose level defaults from a Ritual Magic skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RitualSpellEntry {
    pub name: String,
    #[serde(default = "default_ritual_skill")]
    pub base_skill: String,
    #[serde(default)]
    pub colleges: Vec<String>,
    #[serde(default)]
    pub power_source: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub prerequisite_count: i32,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl RitualSpellEntry {
    pub fn query(&self) -> RitualMagicQuery<'_> {
        RitualMagicQuery {
            name: &self.name,
            base_skill: &self.base_skill,
            colleges: &self.colleges,
            power_source: &self.power_source,
            categories: &self.categories,
            difficulty: self.difficulty,
            prerequisite_count: self.prerequisite_count,
            points: self.points,
        }
    }

    pub fn resolve(&self, context: &Context<'_>) -> Result<SkillLevel> {
        resolve_ritual_magic_level(context, &self.query())
    }
}

/// A character, or a template when `template` is set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// Templates carry entries but no concrete character
    #[serde(default)]
    pub template: bool,
    /// Attribute base scores keyed by lower-cased id
    #[serde(default)]
    attributes: AHashMap<String, i32>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub spells: Vec<SpellEntry>,
    #[serde(default)]
    pub ritual_spells: Vec<RitualSpellEntry>,
    #[serde(default)]
    pub bonuses: BonusRegistry,
}

impl Character {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, id: &str, value: i32) -> Self {
        self.set_attribute(id, value);
        self
    }

    pub fn set_attribute(&mut self, id: &str, value: i32) {
        self.attributes.insert(id.to_lowercase(), value);
    }

    /// Lower-case attribute keys loaded from a sheet
    pub(crate) fn normalize_attributes(&mut self) {
        let attributes = std::mem::take(&mut self.attributes);
        for (id, value) in attributes {
            self.set_attribute(&id, value);
        }
    }

    /// Resolution context for this sheet
    pub fn context(&self) -> Context<'_> {
        if self.template {
            Context::Template
        } else {
            Context::Live(self)
        }
    }
}

impl AttributeSource for Character {
    fn base_level(&self, attribute: &str) -> Option<i32> {
        self.attributes.get(&attribute.to_lowercase()).copied()
    }
}

impl BonusAggregator for Character {
    fn bonus_for(&self, key: &BonusKey, categories: &[String]) -> BonusContribution {
        self.bonuses.bonus_for(key, categories)
    }
}

impl SkillSource for Character {
    fn best_skill_level(
        &self,
        name: &str,
        specialization: Option<&str>,
        require_points: bool,
    ) -> Option<i32> {
        let name = name.to_lowercase();
        let specialization = specialization
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let context = Context::Live(self);

        self.skills
            .iter()
            .filter(|skill| skill.name.to_lowercase() == name)
            .filter(|skill| {
                specialization.as_deref().map_or(true, |want| {
                    skill.specialization.as_deref().unwrap_or("").to_lowercase() == want
                })
            })
            .filter(|skill| !require_points || skill.points > 0)
            .filter_map(|skill| match skill.try_resolve(&context) {
                Ok(level) => level,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", skill.full_name(), e);
                    None
                }
            })
            .map(|level| level.level)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::Bonus;

    fn ritual_magic(college: &str, points: i32) -> SkillEntry {
        SkillEntry::new("Ritual Magic", "iq", Difficulty::VeryHard, points)
            .with_specialization(college)
    }

    fn wizard() -> Character {
        let mut character = Character::new("Wizard").with_attribute("IQ", 13);
        character.skills.push(ritual_magic("Fire", 8));
        character.skills.push(ritual_magic("Air", 1));
        character
            .skills
            .push(SkillEntry::new("Thaumatology", "iq", Difficulty::VeryHard, 0));
        character
    }

    #[test]
    fn test_attribute_lookup_case_insensitive() {
        let character = wizard();
        assert_eq!(character.base_level("iq"), Some(13));
        assert_eq!(character.base_level("IQ"), Some(13));
        assert_eq!(character.base_level("dx"), None);
    }

    #[test]
    fn test_best_skill_level_any_specialization() {
        // Fire: 13 - 3 + 1 + 2 = 13. Air: 13 - 3 = 10.
        let character = wizard();
        assert_eq!(character.best_skill_level("ritual magic", None, false), Some(13));
        assert_eq!(character.best_skill_level("Ritual Magic", Some(""), false), Some(13));
    }

    #[test]
    fn test_best_skill_level_specialized() {
        let character = wizard();
        assert_eq!(character.best_skill_level("Ritual Magic", Some("air"), false), Some(10));
        assert_eq!(character.best_skill_level("Ritual Magic", Some("Water"), false), None);
    }

    #[test]
    fn test_best_skill_level_skips_unperformable() {
        let character = wizard();
        assert_eq!(character.best_skill_level("Thaumatology", None, false), None);
    }

    #[test]
    fn test_require_points() {
        let mut character = wizard();
        character.skills.push(ritual_magic("Earth", 0));
        assert_eq!(character.best_skill_level("Ritual Magic", Some("earth"), true), None);
    }

    #[test]
    fn test_best_skill_level_keeps_minus_one() {
        // DX 0, Average at one point
        let mut character = wizard().with_attribute("DX", 0);
        character
            .skills
            .push(SkillEntry::new("Stealth", "dx", Difficulty::Average, 1));
        assert_eq!(character.best_skill_level("Stealth", None, false), Some(-1));
    }

    #[test]
    fn test_template_context() {
        let mut character = wizard();
        character.template = true;
        assert!(!character.context().is_live());
        let level = character.skills[0].resolve(&character.context()).unwrap();
        assert_eq!(level, SkillLevel::cannot_perform());
    }

    #[test]
    fn test_ritual_spell_from_sheet() {
        let mut character = wizard();
        character.bonuses.add(Bonus::new("Fire Talent", "spell.college/fire", 1));
        let spell = RitualSpellEntry {
            name: "Ignite Fire".into(),
            base_skill: DEFAULT_RITUAL_SKILL.into(),
            colleges: vec!["Fire".into()],
            power_source: String::new(),
            difficulty: Difficulty::Hard,
            prerequisite_count: 0,
            points: 1,
            categories: Vec::new(),
        };

        // Specialized: 13 - 0 + 0 = 13. Generic: 13 - 6 = 7. Then +1 talent.
        let level = spell.resolve(&character.context()).unwrap();
        assert_eq!(level.level, 14);
        assert_eq!(level.relative_level, 1);
        assert_eq!(level.tooltip, "Fire Talent [+1]");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(ritual_magic("Fire", 1).full_name(), "Ritual Magic (Fire)");
        let skill = SkillEntry::new("Thaumatology", "iq", Difficulty::VeryHard, 1);
        assert_eq!(skill.full_name(), "Thaumatology");
    }
}
