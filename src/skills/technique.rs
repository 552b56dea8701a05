//! Technique levels: capabilities that default from a base skill
//!
//! A technique starts at its base skill's level plus the default penalty and
//! is bought up one level per point (Hard techniques waste their first point).

use crate::skills::{collect_bonuses, skill_bonus_keys, CharacterView, Difficulty, SkillLevel};

/// The skill a default is taken from, and at what penalty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultReference {
    /// Base skill name; `None` when there is nothing to default from
    pub target: Option<String>,
    /// Required specialization of the base skill; `None` accepts any
    pub specialization: Option<String>,
    /// Applied to the base skill level (normally negative)
    pub penalty: i32,
}

impl DefaultReference {
    pub fn new(target: Option<&str>, specialization: Option<&str>, penalty: i32) -> Self {
        Self {
            target: target.map(str::to_string),
            specialization: specialization.map(str::to_string),
            penalty,
        }
    }
}

/// The technique being resolved
#[derive(Debug, Clone, Copy)]
pub struct TechniqueQuery<'a> {
    pub name: &'a str,
    pub specialization: Option<&'a str>,
    pub categories: &'a [String],
    pub difficulty: Difficulty,
    pub points: i32,
    /// Only default from base skills with points invested
    pub require_points: bool,
    /// Cap on the final level, relative to the base skill
    pub limit_modifier: Option<i32>,
}

/// Resolve a technique against a character
///
/// Points must already be normalized. The default penalty is reflected in
/// `level` only; callers that report it in the relative level add it themselves.
/// `None` when there is no base skill to default from.
pub fn technique_level<V: CharacterView + ?Sized>(
    view: &V,
    default: &DefaultReference,
    query: &TechniqueQuery<'_>,
) -> Option<SkillLevel> {
    let target = default.target.as_deref()?;

    let Some(base_level) =
        view.best_skill_level(target, default.specialization.as_deref(), query.require_points)
    else {
        tracing::debug!(
            "{} has no base skill {:?} ({:?}) to default from",
            query.name,
            target,
            default.specialization
        );
        return None;
    };

    let mut level = base_level + default.penalty;
    let mut points = query.points;
    if query.difficulty == Difficulty::Hard {
        points -= 1;
    }
    let mut relative_level = points.max(0);

    let mut tooltip = String::new();
    let keys = skill_bonus_keys(query.name, query.specialization);
    relative_level += collect_bonuses(view, &keys, query.categories, &mut tooltip);
    level += relative_level;

    if let Some(limit) = query.limit_modifier {
        let max = base_level + limit;
        if level > max {
            relative_level -= level - max;
            level = max;
        }
    }

    Some(SkillLevel::new(level, relative_level, tooltip))
}
