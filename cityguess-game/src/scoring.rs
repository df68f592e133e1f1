//! Distance-to-outcome scoring policy.
//!
//! A guess is scored by the first bracket whose inclusive upper bound
//! contains the distance, so ties at a boundary resolve to the closer
//! bracket. Only guesses within the closest three brackets award points
//! and count toward accuracy; anything past them costs a life and breaks
//! the streak, with no partial credit.

use serde::Serialize;

use crate::constants::{
    CLOSE_MAX_KM, CLOSE_POINTS, NEAR_MISS_MAX_KM, PERFECT_MAX_KM, PERFECT_POINTS,
    VERY_CLOSE_MAX_KM, VERY_CLOSE_POINTS,
};

/// One row of the distance-to-outcome table.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    max_km: f64,
    label: &'static str,
    points: u32,
    is_correct: bool,
    loses_life: bool,
}

const BRACKETS: [Bracket; 5] = [
    Bracket {
        max_km: PERFECT_MAX_KM,
        label: "Perfect guess!",
        points: PERFECT_POINTS,
        is_correct: true,
        loses_life: false,
    },
    Bracket {
        max_km: VERY_CLOSE_MAX_KM,
        label: "Very close!",
        points: VERY_CLOSE_POINTS,
        is_correct: true,
        loses_life: false,
    },
    Bracket {
        max_km: CLOSE_MAX_KM,
        label: "Close guess!",
        points: CLOSE_POINTS,
        is_correct: true,
        loses_life: false,
    },
    Bracket {
        max_km: NEAR_MISS_MAX_KM,
        label: "Far, but not too bad.",
        points: 0,
        is_correct: false,
        loses_life: true,
    },
    Bracket {
        max_km: f64::INFINITY,
        label: "Way too far.",
        points: 0,
        is_correct: false,
        loses_life: true,
    },
];

/// Result of evaluating a guess distance against the bracket table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringOutcome {
    /// Great-circle distance between guess and target, in km.
    pub distance_km: f64,
    /// Display label for the bracket that matched.
    pub label: &'static str,
    /// Points awarded by the bracket; never negative.
    pub points: u32,
    /// Whether the guess counts toward accuracy.
    pub is_correct: bool,
    /// Whether the guess costs a life and resets the streak.
    pub loses_life: bool,
}

/// Map a distance to its scoring outcome.
#[must_use]
pub fn evaluate(distance_km: f64) -> ScoringOutcome {
    let bracket = BRACKETS
        .iter()
        .find(|bracket| distance_km <= bracket.max_km)
        .unwrap_or(&BRACKETS[BRACKETS.len() - 1]);
    ScoringOutcome {
        distance_km,
        label: bracket.label,
        points: bracket.points,
        is_correct: bracket.is_correct,
        loses_life: bracket.loses_life,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_boundary_is_inclusive() {
        assert_eq!(evaluate(50.0).points, 150);
        assert_eq!(evaluate(50.0001).points, 120);
    }

    #[test]
    fn very_close_and_close_boundaries() {
        assert_eq!(evaluate(150.0).points, 120);
        assert_eq!(evaluate(150.0001).points, 80);
        assert_eq!(evaluate(400.0).points, 80);
        assert_eq!(evaluate(400.0001).points, 0);
        assert!(evaluate(400.0001).loses_life);
    }

    #[test]
    fn both_sides_of_last_finite_boundary_lose_a_life() {
        let near = evaluate(1_500.0);
        let far = evaluate(1_500.0001);
        assert!(near.loses_life);
        assert!(far.loses_life);
        assert_eq!(near.label, "Far, but not too bad.");
        assert_eq!(far.label, "Way too far.");
    }

    #[test]
    fn correctness_tracks_point_brackets() {
        assert!(evaluate(0.0).is_correct);
        assert!(evaluate(399.9).is_correct);
        assert!(!evaluate(401.0).is_correct);
        assert!(!evaluate(10_000.0).is_correct);
    }

    #[test]
    fn points_are_never_awarded_past_close_bracket() {
        for distance in [401.0, 1_000.0, 1_500.0, 2_000.0, 20_000.0] {
            assert_eq!(evaluate(distance).points, 0);
        }
    }
}
