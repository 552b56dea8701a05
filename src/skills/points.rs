//! The point-investment curve
//!
//! One point buys the difficulty's base level, two or three points buy one
//! more, and from four points on every further four points buy another.

use crate::core::config::{EngineConfig, NegativePointPolicy};
use crate::core::error::{ProficiencyError, Result};
use crate::skills::Difficulty;

/// Points needed before the curve flattens to one level per four points
const FLAT_RATE_THRESHOLD: i32 = 4;

/// Wildcard skills only count every third point
const WILDCARD_DIVISOR: i32 = 3;

/// Outcome of evaluating the point curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCurve {
    /// False when fewer than one effective point was invested
    pub usable: bool,
    /// Relative level bought by the investment
    pub delta: i32,
}

/// Effective points after the Wildcard divisor
pub fn effective_points(points: i32, difficulty: Difficulty) -> i32 {
    if difficulty == Difficulty::Wildcard {
        points / WILDCARD_DIVISOR
    } else {
        points
    }
}

/// Convert a point investment into a relative level
pub fn points_to_relative_level(points: i32, difficulty: Difficulty) -> PointCurve {
    let points = effective_points(points, difficulty);
    let base = difficulty.base_relative_level();

    match points {
        p if p < 1 => PointCurve {
            usable: false,
            delta: 0,
        },
        1 => PointCurve {
            usable: true,
            delta: base,
        },
        p if p < FLAT_RATE_THRESHOLD => PointCurve {
            usable: true,
            delta: base + 1,
        },
        p => PointCurve {
            usable: true,
            delta: base + 1 + p / FLAT_RATE_THRESHOLD,
        },
    }
}

/// Apply the configured negative-point policy
pub fn normalize_points_with(points: i32, config: &EngineConfig) -> Result<i32> {
    if points >= 0 {
        return Ok(points);
    }
    match config.negative_points {
        NegativePointPolicy::Reject => Err(ProficiencyError::InvalidInput {
            field: "points",
            value: points,
            reason: "point investment must not be negative",
        }),
        NegativePointPolicy::Clamp => Ok(0),
    }
}

/// Apply the global negative-point policy
pub fn normalize_points(points: i32) -> Result<i32> {
    normalize_points_with(points, crate::core::config::config())
}
