//! Skill and spell level resolution
//!
//! Levels come from three inputs: the governing attribute (or the skill a
//! technique defaults from), the points invested, and the bonuses the
//! character carries. Every result carries a tooltip naming each bonus.

pub mod bonus;
pub mod context;
pub mod defaulting;
pub mod difficulty;
pub mod display;
pub mod level;
pub mod points;
pub mod resolution;
pub mod technique;

pub use bonus::{
    skill_bonus_keys, spell_bonus_keys, Bonus, BonusAggregator, BonusContribution, BonusKey,
    BonusRegistry, StringCriteria, SKILL_NAME_ID, SPELL_COLLEGE_ID, SPELL_NAME_ID,
    SPELL_POWER_SOURCE_ID,
};
pub use context::{AttributeSource, CharacterView, Context, SkillSource};
pub use defaulting::{
    best_for_college, evaluate_strategy, resolve_ritual_magic_level,
    resolve_ritual_magic_level_with, DefaultStrategy, RitualMagicQuery, DEFAULT_RITUAL_SKILL,
};
pub use difficulty::Difficulty;
pub use display::{format_level, format_relative_level, format_technique_level};
pub use level::{append_tooltip, SkillLevel, CANNOT_PERFORM};
pub use points::{
    effective_points, normalize_points, normalize_points_with, points_to_relative_level,
    PointCurve,
};
pub use resolution::{
    assemble_level, collect_bonuses, resolve_level, resolve_skill_level, resolve_spell_level,
    try_resolve_level,
};
pub use technique::{technique_level, DefaultReference, TechniqueQuery};
