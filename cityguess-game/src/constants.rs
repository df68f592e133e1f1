//! Centralized balance and tuning constants for CityGuess game logic.
//!
//! These values define the deterministic math for the core session.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_GUESS_HIT: &str = "log.guess.hit";
pub(crate) const LOG_GUESS_MISS: &str = "log.guess.miss";
pub(crate) const LOG_STREAK_BONUS: &str = "log.streak.bonus";
pub(crate) const LOG_ROUND_SKIP: &str = "log.round.skip";
pub(crate) const LOG_ROUND_UNSCOREABLE: &str = "log.round.unscoreable";
pub(crate) const LOG_BEST_SCORE_UPDATED: &str = "log.best-score.updated";
pub(crate) const LOG_END_TIME: &str = "log.end.time";
pub(crate) const LOG_END_LIVES: &str = "log.end.lives";
pub(crate) const LOG_END_DECK: &str = "log.end.deck";

// Session tuning -----------------------------------------------------------
pub(crate) const SESSION_SECONDS: u32 = 60;
pub(crate) const STARTING_LIVES: u8 = 5;
pub(crate) const STREAK_THRESHOLD: u32 = 3;
pub(crate) const STREAK_BONUS_POINTS: u32 = 50;

// Geometry -----------------------------------------------------------------
pub(crate) const EARTH_RADIUS_KM: f64 = 6_371.0;

// Scoring brackets (inclusive upper bounds in km) --------------------------
pub(crate) const PERFECT_MAX_KM: f64 = 50.0;
pub(crate) const VERY_CLOSE_MAX_KM: f64 = 150.0;
pub(crate) const CLOSE_MAX_KM: f64 = 400.0;
pub(crate) const NEAR_MISS_MAX_KM: f64 = 1_500.0;

pub(crate) const PERFECT_POINTS: u32 = 150;
pub(crate) const VERY_CLOSE_POINTS: u32 = 120;
pub(crate) const CLOSE_POINTS: u32 = 80;

#[cfg(test)]
pub(crate) const FLOAT_EPSILON: f64 = 1e-9;
