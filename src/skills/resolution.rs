//! Level resolution for directly trained skills and spells
//!
//! A trained level is the governing attribute plus whatever the point curve
//! buys, adjusted by every bonus the character carries for it.

use crate::core::error::Result;
use crate::skills::{
    normalize_points, points_to_relative_level, skill_bonus_keys, spell_bonus_keys,
    BonusAggregator, BonusKey, Context, Difficulty, SkillLevel,
};

/// Resolve a trained level against a character context
///
/// Template contexts and unknown attributes yield the cannot-perform sentinel.
/// Points are validated first, so a template entry with invalid points is
/// still an error.
pub fn resolve_level(
    context: &Context<'_>,
    attribute: &str,
    points: i32,
    difficulty: Difficulty,
    bonus_keys: &[BonusKey],
    categories: &[String],
) -> Result<SkillLevel> {
    let level =
        try_resolve_level(context, attribute, points, difficulty, bonus_keys, categories)?;
    Ok(level.unwrap_or_else(SkillLevel::cannot_perform))
}

/// Resolve a trained level, returning `None` when it cannot be performed
///
/// Unlike [`resolve_level`] a computed level of -1 stays distinguishable from
/// "cannot perform".
pub fn try_resolve_level(
    context: &Context<'_>,
    attribute: &str,
    points: i32,
    difficulty: Difficulty,
    bonus_keys: &[BonusKey],
    categories: &[String],
) -> Result<Option<SkillLevel>> {
    let points = normalize_points(points)?;

    let Context::Live(view) = context else {
        return Ok(None);
    };

    let Some(attribute_base) = view.base_level(attribute) else {
        tracing::debug!("No base level for attribute {:?}", attribute);
        return Ok(None);
    };

    Ok(assemble_level(
        *view,
        attribute_base,
        points,
        difficulty,
        bonus_keys,
        categories,
    ))
}

/// Combine an attribute base, the point curve and the bonuses into a level
///
/// Points must already be normalized. `None` when the points buy nothing.
pub fn assemble_level<B: BonusAggregator + ?Sized>(
    bonuses: &B,
    attribute_base: i32,
    points: i32,
    difficulty: Difficulty,
    bonus_keys: &[BonusKey],
    categories: &[String],
) -> Option<SkillLevel> {
    let curve = points_to_relative_level(points, difficulty);
    if !curve.usable {
        return None;
    }

    let mut relative_level = curve.delta;
    let mut tooltip = String::new();
    relative_level += collect_bonuses(bonuses, bonus_keys, categories, &mut tooltip);

    Some(SkillLevel::new(attribute_base + relative_level, relative_level, tooltip))
}

/// Sum the bonuses for a set of keys, appending their explanations to `tooltip`
pub fn collect_bonuses<B: BonusAggregator + ?Sized>(
    bonuses: &B,
    bonus_keys: &[BonusKey],
    categories: &[String],
    tooltip: &mut String,
) -> i32 {
    let mut total = 0;
    for key in bonus_keys {
        let found = bonuses.bonus_for(key, categories);
        total += found.amount;
        if let Some(explanation) = found.explanation {
            crate::skills::append_tooltip(tooltip, &explanation);
        }
    }
    total
}

/// Resolve a skill, applying the skill-name bonuses
pub fn resolve_skill_level(
    context: &Context<'_>,
    name: &str,
    specialization: Option<&str>,
    attribute: &str,
    difficulty: Difficulty,
    points: i32,
    categories: &[String],
) -> Result<SkillLevel> {
    let keys = skill_bonus_keys(name, specialization);
    resolve_level(context, attribute, points, difficulty, &keys, categories)
}

/// Resolve a spell, applying college, power source and name bonuses
///
/// College bonuses are matched against every college the spell belongs to.
#[allow(clippy::too_many_arguments)]
pub fn resolve_spell_level(
    context: &Context<'_>,
    name: &str,
    colleges: &[String],
    power_source: &str,
    attribute: &str,
    difficulty: Difficulty,
    points: i32,
    categories: &[String],
) -> Result<SkillLevel> {
    let keys = spell_bonus_keys(name, colleges, power_source);
    resolve_level(context, attribute, points, difficulty, &keys, categories)
}
