//! Ritual Magic spell levels
//!
//! A Ritual Magic spell is a technique of its base skill. For every college it
//! may default from the base skill specialized in that college, or from the
//! base skill in general at a steeper penalty. Both defaults are tried for
//! every college and the best result wins.

use crate::core::config::{config, EngineConfig};
use crate::core::error::{ProficiencyError, Result};
use crate::skills::{
    collect_bonuses, normalize_points_with, spell_bonus_keys, technique_level, CharacterView,
    Context, DefaultReference, Difficulty, SkillLevel, TechniqueQuery,
};

/// Default skill name for Ritual Magic spells
pub const DEFAULT_RITUAL_SKILL: &str = "Ritual Magic";

/// The two ways a Ritual Magic spell can default from its base skill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultStrategy {
    /// Base skill specialized in the college, at -(prerequisites)
    Specialized,
    /// Base skill in any specialization, at -(generic penalty + prerequisites)
    Generic,
}

impl DefaultStrategy {
    /// Build the default this strategy takes for one college
    pub fn reference(
        self,
        base_skill: &str,
        college: &str,
        prerequisite_count: i32,
        config: &EngineConfig,
    ) -> DefaultReference {
        // Without a college there is no specialization to default from
        let target = (!college.is_empty()).then_some(base_skill);
        match self {
            DefaultStrategy::Specialized => {
                DefaultReference::new(target, Some(college), -prerequisite_count)
            }
            DefaultStrategy::Generic => DefaultReference::new(
                target,
                None,
                -(config.generic_default_penalty + prerequisite_count),
            ),
        }
    }
}

/// A Ritual Magic spell to resolve
#[derive(Debug, Clone, Copy)]
pub struct RitualMagicQuery<'a> {
    pub name: &'a str,
    /// Skill the spell defaults from, usually "Ritual Magic"
    pub base_skill: &'a str,
    pub colleges: &'a [String],
    pub power_source: &'a str,
    pub categories: &'a [String],
    pub difficulty: Difficulty,
    /// Number of prerequisite spells; must not be negative
    pub prerequisite_count: i32,
    pub points: i32,
}

/// Resolve a Ritual Magic spell against a character context
pub fn resolve_ritual_magic_level(
    context: &Context<'_>,
    query: &RitualMagicQuery<'_>,
) -> Result<SkillLevel> {
    resolve_ritual_magic_level_with(context, query, config())
}

/// Resolve a Ritual Magic spell with an explicit config
pub fn resolve_ritual_magic_level_with(
    context: &Context<'_>,
    query: &RitualMagicQuery<'_>,
    config: &EngineConfig,
) -> Result<SkillLevel> {
    if query.prerequisite_count < 0 {
        return Err(ProficiencyError::InvalidInput {
            field: "prerequisite_count",
            value: query.prerequisite_count,
            reason: "prerequisite spell count must not be negative",
        });
    }
    let points = normalize_points_with(query.points, config)?;

    let Context::Live(view) = context else {
        return Ok(SkillLevel::cannot_perform());
    };
    let view: &dyn CharacterView = *view;

    let empty = [String::new()];
    let colleges = if query.colleges.is_empty() {
        &empty[..]
    } else {
        query.colleges
    };

    let mut best: Option<SkillLevel> = None;
    for college in colleges {
        let Some(candidate) = best_for_college(view, query, college, points, config) else {
            continue;
        };
        if best
            .as_ref()
            .map_or(true, |current| candidate.level > current.level)
        {
            best = Some(candidate);
        }
    }

    let Some(mut level) = best else {
        return Ok(SkillLevel::cannot_perform());
    };

    // College bonuses match any of the spell's colleges, not just the winner
    let keys = spell_bonus_keys(query.name, query.colleges, query.power_source);
    let bonus = collect_bonuses(view, &keys, query.categories, &mut level.tooltip);
    level.level += bonus;
    level.relative_level += bonus;

    Ok(level)
}

/// Evaluate both strategies for one college and keep the better
///
/// Ties keep the specialized default. `None` when neither has a base skill.
pub fn best_for_college<V: CharacterView + ?Sized>(
    view: &V,
    query: &RitualMagicQuery<'_>,
    college: &str,
    points: i32,
    config: &EngineConfig,
) -> Option<SkillLevel> {
    let specialized = evaluate_strategy(
        view,
        query,
        college,
        points,
        DefaultStrategy::Specialized,
        config,
    );
    let generic = evaluate_strategy(view, query, college, points, DefaultStrategy::Generic, config);

    match (specialized, generic) {
        (Some(specialized), Some(generic)) if specialized.level >= generic.level => {
            tracing::trace!(
                "{} ({}): specialized default {} beats generic {}",
                query.name,
                college,
                specialized.level,
                generic.level
            );
            Some(specialized)
        }
        (Some(specialized), Some(generic)) => {
            tracing::trace!(
                "{} ({}): generic default {} beats specialized {}",
                query.name,
                college,
                generic.level,
                specialized.level
            );
            Some(generic)
        }
        (specialized, generic) => specialized.or(generic),
    }
}

/// Resolve one strategy, reporting its default penalty in the relative level
pub fn evaluate_strategy<V: CharacterView + ?Sized>(
    view: &V,
    query: &RitualMagicQuery<'_>,
    college: &str,
    points: i32,
    strategy: DefaultStrategy,
    config: &EngineConfig,
) -> Option<SkillLevel> {
    let default = strategy.reference(query.base_skill, college, query.prerequisite_count, config);
    let technique = TechniqueQuery {
        name: query.name,
        specialization: Some(college),
        categories: query.categories,
        difficulty: query.difficulty,
        points,
        require_points: false,
        limit_modifier: Some(config.ritual_level_limit),
    };

    let mut level = technique_level(view, &default, &technique)?;
    level.relative_level += default.penalty;
    Some(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::NegativePointPolicy;
    use crate::skills::{
        AttributeSource, Bonus, BonusAggregator, BonusContribution, BonusKey, BonusRegistry,
        SkillSource, StringCriteria,
    };
    use proptest::prelude::*;

    /// Exposes fixed Ritual Magic levels per specialization
    struct FakeCharacter {
        skills: Vec<(String, i32)>,
        bonuses: BonusRegistry,
    }

    impl FakeCharacter {
        fn new(skills: &[(&str, i32)]) -> Self {
            Self {
                skills: skills.iter().map(|(s, l)| (s.to_string(), *l)).collect(),
                bonuses: BonusRegistry::new(),
            }
        }
    }

    impl AttributeSource for FakeCharacter {
        fn base_level(&self, _: &str) -> Option<i32> {
            Some(12)
        }
    }

    impl BonusAggregator for FakeCharacter {
        fn bonus_for(&self, key: &BonusKey, categories: &[String]) -> BonusContribution {
            self.bonuses.bonus_for(key, categories)
        }
    }

    impl SkillSource for FakeCharacter {
        fn best_skill_level(
            &self,
            name: &str,
            specialization: Option<&str>,
            _: bool,
        ) -> Option<i32> {
            if !name.eq_ignore_ascii_case(DEFAULT_RITUAL_SKILL) {
                return None;
            }
            let want = specialization.filter(|s| !s.is_empty());
            self.skills
                .iter()
                .filter(|(s, _)| want.map_or(true, |want| s.eq_ignore_ascii_case(want)))
                .map(|(_, level)| *level)
                .max()
        }
    }

    fn colleges(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn query<'a>(
        colleges: &'a [String],
        prerequisite_count: i32,
        points: i32,
    ) -> RitualMagicQuery<'a> {
        RitualMagicQuery {
            name: "Ignite Fire",
            base_skill: DEFAULT_RITUAL_SKILL,
            colleges,
            power_source: "Arcane",
            categories: &[],
            difficulty: Difficulty::Hard,
            prerequisite_count,
            points,
        }
    }

    fn resolve(character: &FakeCharacter, query: &RitualMagicQuery<'_>) -> SkillLevel {
        resolve_ritual_magic_level(&Context::live(character), query).unwrap()
    }

    #[test]
    fn test_strategy_penalties() {
        let config = EngineConfig::default();
        let specialized =
            DefaultStrategy::Specialized.reference(DEFAULT_RITUAL_SKILL, "Fire", 2, &config);
        assert_eq!(specialized.penalty, -2);
        assert_eq!(specialized.specialization.as_deref(), Some("Fire"));

        let generic = DefaultStrategy::Generic.reference(DEFAULT_RITUAL_SKILL, "Fire", 2, &config);
        assert_eq!(generic.penalty, -8);
        assert_eq!(generic.specialization, None);
        assert_eq!(generic.target.as_deref(), Some(DEFAULT_RITUAL_SKILL));
    }

    #[test]
    fn test_empty_college_has_no_target() {
        let config = EngineConfig::default();
        for strategy in [DefaultStrategy::Specialized, DefaultStrategy::Generic] {
            let default = strategy.reference(DEFAULT_RITUAL_SKILL, "", 1, &config);
            assert_eq!(default.target, None);
        }
    }

    #[test]
    fn test_specialized_wins() {
        // Fire 14 at -2 vs any 14 at -8
        let character = FakeCharacter::new(&[("Fire", 14)]);
        let fire = colleges(&["Fire"]);
        let level = resolve(&character, &query(&fire, 2, 4));

        // 14 - 2 + 3 points = 15, capped at 14
        assert_eq!(level.level, 14);
        assert_eq!(level.relative_level, 2 - 2);
    }

    #[test]
    fn test_generic_wins_when_other_specialty_is_stronger() {
        let character = FakeCharacter::new(&[("Fire", 10), ("Water", 20)]);
        let fire = colleges(&["Fire"]);
        let level = resolve(&character, &query(&fire, 2, 4));

        // Specialized: 10 - 2 + 3 = 11, capped at 10. Generic: 20 - 8 + 3 = 15.
        assert_eq!(level.level, 15);
        assert_eq!(level.relative_level, 3 - 8);
    }

    #[test]
    fn test_tie_keeps_specialized() {
        // Specialized: 13 - 1 + 0 = 12. Generic: 19 - 7 + 0 = 12.
        let character = FakeCharacter::new(&[("Fire", 13), ("Water", 19)]);
        let fire = colleges(&["Fire"]);
        let config = EngineConfig::default();
        let level = best_for_college(&character, &query(&fire, 1, 1), "Fire", 1, &config).unwrap();
        assert_eq!(level.level, 12);
        assert_eq!(level.relative_level, -1);
    }

    #[test]
    fn test_best_college_wins() {
        let character = FakeCharacter::new(&[("Fire", 10), ("Air", 15)]);
        let list = colleges(&["Fire", "Air"]);
        let level = resolve(&character, &query(&list, 0, 2));
        // Air: 15 + 1 = 16, capped at 15
        assert_eq!(level.level, 15);
    }

    #[test]
    fn test_first_college_wins_ties() {
        let mut character = FakeCharacter::new(&[("Fire", 12), ("Air", 12)]);
        character.bonuses = BonusRegistry::new().with(
            Bonus::new("Air Focus", "skill.name*", 0)
                .with_specialization(StringCriteria::Is("air".into())),
        );
        let list = colleges(&["Fire", "Air"]);
        let level = resolve(&character, &query(&list, 0, 1));
        // Both colleges reach 12; the Fire candidate carries no technique bonus
        assert_eq!(level.level, 12);
        assert!(level.tooltip.is_empty());
    }

    #[test]
    fn test_college_bonus_from_losing_college_applies() {
        let mut character = FakeCharacter::new(&[("Fire", 12), ("Air", 10)]);
        character.bonuses =
            BonusRegistry::new().with(Bonus::new("Air Talent", "spell.college/air", 2));
        let list = colleges(&["Fire", "Air"]);
        let level = resolve(&character, &query(&list, 0, 1));
        // Fire wins at 12; the spell is still an Air spell
        assert_eq!(level.level, 14);
        assert_eq!(level.relative_level, 2);
        assert_eq!(level.tooltip, "Air Talent [+2]");
    }

    #[test]
    fn test_spell_bonuses_added_to_winner() {
        let mut character = FakeCharacter::new(&[("Fire", 14)]);
        character.bonuses = BonusRegistry::new()
            .with(Bonus::new("Magery 1", "spell.college", 1))
            .with(Bonus::new("Fire Talent", "spell.college/fire", 2));
        let fire = colleges(&["Fire"]);
        let level = resolve(&character, &query(&fire, 2, 4));
        assert_eq!(level.level, 17);
        assert_eq!(level.relative_level, 3);
        assert_eq!(level.tooltip, "Magery 1 [+1]\nFire Talent [+2]");
    }

    #[test]
    fn test_level_of_minus_one_keeps_penalty_and_bonuses() {
        let mut character = FakeCharacter::new(&[("Fire", 0)]);
        character.bonuses = BonusRegistry::new().with(Bonus::new("Magery 3", "spell.college", 3));
        let fire = colleges(&["Fire"]);
        let q = RitualMagicQuery {
            difficulty: Difficulty::Average,
            ..query(&fire, 1, 0)
        };
        // 0 - 1 = -1 before bonuses, relative -1 from the default penalty
        let level = resolve(&character, &q);
        assert_eq!(level, SkillLevel::new(2, 2, "Magery 3 [+3]".to_string()));
    }

    #[test]
    fn test_template_skips_evaluation() {
        let fire = colleges(&["Fire"]);
        let level = resolve_ritual_magic_level(&Context::Template, &query(&fire, 2, 4)).unwrap();
        assert_eq!(level, SkillLevel::cannot_perform());
    }

    #[test]
    fn test_empty_colleges_matches_empty_string() {
        let mut character = FakeCharacter::new(&[("Fire", 14)]);
        character.bonuses = BonusRegistry::new().with(Bonus::new("Magery 1", "spell.college", 1));
        let none: Vec<String> = Vec::new();
        let blank = colleges(&[""]);
        let from_none = resolve(&character, &query(&none, 2, 4));
        let from_blank = resolve(&character, &query(&blank, 2, 4));
        assert_eq!(from_none, from_blank);
        assert_eq!(from_none, SkillLevel::cannot_perform());
    }

    #[test]
    fn test_negative_prerequisites_rejected() {
        let fire = colleges(&["Fire"]);
        let result = resolve_ritual_magic_level(&Context::Template, &query(&fire, -1, 4));
        assert!(matches!(
            result,
            Err(ProficiencyError::InvalidInput { field: "prerequisite_count", .. })
        ));
    }

    #[test]
    fn test_explicit_config_decides_negative_points() {
        let character = FakeCharacter::new(&[("Fire", 14)]);
        let fire = colleges(&["Fire"]);
        let ctx = Context::live(&character);
        let clamp = EngineConfig {
            negative_points: NegativePointPolicy::Clamp,
            ..EngineConfig::default()
        };

        // Clamped to 0 points: 14 - 2, relative -2
        let level = resolve_ritual_magic_level_with(&ctx, &query(&fire, 2, -2), &clamp).unwrap();
        assert_eq!(level.level, 12);
        assert_eq!(level.relative_level, -2);

        let reject = EngineConfig::default();
        let result = resolve_ritual_magic_level_with(&ctx, &query(&fire, 2, -2), &reject);
        assert!(matches!(
            result,
            Err(ProficiencyError::InvalidInput { field: "points", value: -2, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_never_below_generic(
            fire in 0i32..25,
            water in 0i32..25,
            prerequisites in 0i32..6,
            points in 0i32..20,
        ) {
            let character = FakeCharacter::new(&[("Fire", fire), ("Water", water)]);
            let config = EngineConfig::default();
            let list = colleges(&["Fire", "Water"]);
            let q = query(&list, prerequisites, points);
            let ctx = Context::live(&character);
            let best = resolve_ritual_magic_level_with(&ctx, &q, &config).unwrap();
            for college in ["Fire", "Water"] {
                let generic = evaluate_strategy(
                    &character,
                    &q,
                    college,
                    points,
                    DefaultStrategy::Generic,
                    &config,
                );
                if let Some(generic) = generic {
                    prop_assert!(best.level >= generic.level);
                }
            }
        }
    }
}
