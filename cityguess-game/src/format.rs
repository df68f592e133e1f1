//! User-facing result messages.
//!
//! Pure string builders; the scoring contract lives in `scoring`, this
//! module only renders outcomes for the display sink.

use crate::scoring::ScoringOutcome;
use crate::session::EndReason;

/// Message for a scoring guess: label, rounded distance, points delta.
#[must_use]
pub fn hit_message(outcome: &ScoringOutcome) -> String {
    format!(
        "\u{2705} {} (~{} km from target, +{} pts)",
        outcome.label,
        outcome.distance_km.round() as i64,
        outcome.points
    )
}

/// Message for a non-scoring guess: label, ground-truth city, rounded distance.
#[must_use]
pub fn miss_message(outcome: &ScoringOutcome, city: &str) -> String {
    format!(
        "\u{274c} {} Correct city: {}. You were ~{} km away.",
        outcome.label,
        city,
        outcome.distance_km.round() as i64
    )
}

#[must_use]
pub const fn skip_message() -> &'static str {
    "\u{23ed} Skipped."
}

#[must_use]
pub const fn no_guess_message() -> &'static str {
    "\u{2757} First click on the map to make a guess."
}

#[must_use]
pub const fn unscoreable_message() -> &'static str {
    "No coordinates for this city, skipping."
}

#[must_use]
pub const fn load_error_message() -> &'static str {
    "Data load error"
}

#[must_use]
pub const fn start_message() -> &'static str {
    "Click on the map to guess!"
}

/// Terminal banner shown when the session ends.
#[must_use]
pub fn game_over_message(reason: EndReason) -> String {
    format!("\u{1f3c1} {}", reason.message())
}
