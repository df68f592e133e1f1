//! The game session state machine.
//!
//! A session owns every mutable counter of one play-through: score, lives,
//! streak, accuracy inputs, the countdown, and the round cursor. It is
//! mutated exclusively through its own operations and driven by exactly two
//! external stimuli: a guess/skip request and a clock tick. Once the session
//! reaches `GameOver`, every mutating operation becomes a no-op until
//! `reset` is called.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    LOG_BEST_SCORE_UPDATED, LOG_END_DECK, LOG_END_LIVES, LOG_END_TIME, LOG_GUESS_HIT,
    LOG_GUESS_MISS, LOG_ROUND_SKIP, LOG_ROUND_UNSCOREABLE, LOG_STREAK_BONUS, SESSION_SECONDS,
    STARTING_LIVES, STREAK_BONUS_POINTS, STREAK_THRESHOLD,
};
use crate::format;
use crate::geo::haversine_km;
use crate::prompt::{Coords, Prompt};
use crate::rounds::RoundSequencer;
use crate::scoring::{self, ScoringOutcome};

/// Errors raised by session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No valid current prompt; fatal to the call, not to the session.
    #[error("no active round is available")]
    NoActiveRound,
    /// Guess submission attempted before any guess was placed.
    #[error("no guess has been placed for the current round")]
    NoGuessPlaced,
    /// The data source produced an empty prompt collection.
    #[error("no rounds available; prompt collection is empty")]
    NoPrompts,
}

/// Why a session terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The countdown reached zero.
    TimeUp,
    /// Lives were exhausted by wrong guesses.
    OutOfLives,
    /// Every prompt in the deck was played or skipped.
    DeckExhausted,
}

impl EndReason {
    /// Display string recorded for the game-over screen.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TimeUp => "Time is over!",
            Self::OutOfLives => "No lives left!",
            Self::DeckExhausted => "No more series!",
        }
    }
}

/// Explicit session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Active,
    GameOver(EndReason),
}

/// What a submit call did, beyond any returned error.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The guess was evaluated against the bracket table.
    Scored(ScoringOutcome),
    /// The current prompt had no usable coordinates; the round advanced
    /// silently with no penalty.
    Unscoreable,
    /// The session was already over; nothing happened.
    Ignored,
}

/// Snapshot emitted for the display sink after every state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub round_position: usize,
    pub round_total: usize,
    pub time_remaining: u32,
    pub lives: u8,
    pub score: u32,
    pub best_score: u32,
    pub accuracy_pct: u32,
    pub streak: u32,
    pub avg_seconds_per_question: f64,
    pub last_message: String,
}

/// One complete play-through from reset to termination.
#[derive(Debug, Clone)]
pub struct GameSession {
    rounds: RoundSequencer,
    seed: u64,
    phase: SessionPhase,
    time_remaining: u32,
    elapsed_seconds: u32,
    score: u32,
    best_score: u32,
    lives: u8,
    correct_answers: u32,
    questions_answered: u32,
    streak: u32,
    pending_guess: Option<Coords>,
    last_message: String,
    logs: Vec<String>,
}

impl GameSession {
    /// Start a fresh session over the given prompts.
    ///
    /// `best_score` is the externally persisted high score; it survives
    /// `reset` and is only ever raised, never lowered, by play.
    ///
    /// # Errors
    ///
    /// Returns `NoPrompts` when the prompt collection is empty.
    pub fn new(prompts: Vec<Prompt>, seed: u64, best_score: u32) -> Result<Self, SessionError> {
        if prompts.is_empty() {
            return Err(SessionError::NoPrompts);
        }
        Ok(Self {
            rounds: RoundSequencer::new(prompts, seed),
            seed,
            phase: SessionPhase::Active,
            time_remaining: SESSION_SECONDS,
            elapsed_seconds: 0,
            score: 0,
            best_score,
            lives: STARTING_LIVES,
            correct_answers: 0,
            questions_answered: 0,
            streak: 0,
            pending_guess: None,
            last_message: format::start_message().to_string(),
            logs: Vec::new(),
        })
    }

    /// Register the player's map click for the current round.
    ///
    /// Overwrites any earlier pending guess. Non-finite coordinates are
    /// rejected at this boundary so the scoring pipeline only ever sees
    /// validated numbers. Returns whether the guess was registered.
    pub fn place_guess(&mut self, lat: f64, lon: f64) -> bool {
        if self.is_over() {
            return false;
        }
        let coords = Coords { lat, lon };
        if !coords.is_valid() {
            return false;
        }
        self.pending_guess = Some(coords);
        true
    }

    /// Evaluate the pending guess against the current prompt.
    ///
    /// No-op once the session is over. A prompt without usable coordinates
    /// advances silently with no scoring and no error.
    ///
    /// # Errors
    ///
    /// `NoGuessPlaced` when no guess was registered (session unaffected),
    /// `NoActiveRound` when the cursor is out of bounds.
    pub fn submit_guess(&mut self) -> Result<SubmitOutcome, SessionError> {
        if self.is_over() {
            return Ok(SubmitOutcome::Ignored);
        }

        let (target, city) = {
            let prompt = self.rounds.current()?;
            (prompt.coords(), prompt.city.clone())
        };

        let Some(guess) = self.pending_guess else {
            self.last_message = format::no_guess_message().to_string();
            return Err(SessionError::NoGuessPlaced);
        };

        let Some(target) = target else {
            self.last_message = format::unscoreable_message().to_string();
            self.push_log(LOG_ROUND_UNSCOREABLE);
            self.advance_round();
            return Ok(SubmitOutcome::Unscoreable);
        };

        let distance = haversine_km(guess.lat, guess.lon, target.lat, target.lon);
        self.questions_answered += 1;

        let outcome = scoring::evaluate(distance);
        if outcome.is_correct && outcome.points > 0 {
            self.apply_hit(&outcome);
        } else {
            self.apply_miss(&outcome, &city);
            if self.lives == 0 {
                self.end(EndReason::OutOfLives);
                return Ok(SubmitOutcome::Scored(outcome));
            }
        }

        self.advance_round();
        Ok(SubmitOutcome::Scored(outcome))
    }

    fn apply_hit(&mut self, outcome: &ScoringOutcome) {
        self.correct_answers += 1;
        self.streak += 1;
        self.score += outcome.points;
        self.push_log(LOG_GUESS_HIT);
        if self.streak % STREAK_THRESHOLD == 0 {
            self.score += STREAK_BONUS_POINTS;
            self.push_log(LOG_STREAK_BONUS);
        }
        self.sync_best_score();
        self.last_message = format::hit_message(outcome);
    }

    fn apply_miss(&mut self, outcome: &ScoringOutcome, city: &str) {
        if outcome.loses_life {
            self.lives = self.lives.saturating_sub(1);
            self.streak = 0;
        }
        self.push_log(LOG_GUESS_MISS);
        self.sync_best_score();
        self.last_message = format::miss_message(outcome, city);
    }

    /// Skip the current round: streak resets, no scoring, no life change.
    pub fn skip(&mut self) {
        if self.is_over() {
            return;
        }
        self.streak = 0;
        self.last_message = format::skip_message().to_string();
        self.push_log(LOG_ROUND_SKIP);
        self.advance_round();
    }

    /// Move to the next round, clearing the pending guess. Terminates the
    /// session when the deck is exhausted.
    pub fn advance_round(&mut self) {
        if self.is_over() {
            return;
        }
        self.pending_guess = None;
        if !self.rounds.advance() {
            self.end(EndReason::DeckExhausted);
        }
    }

    /// Apply one second of countdown. Terminates the session when the
    /// countdown reaches zero.
    pub fn on_tick(&mut self) {
        if self.is_over() {
            return;
        }
        self.time_remaining -= 1;
        self.elapsed_seconds += 1;
        if self.time_remaining == 0 {
            self.end(EndReason::TimeUp);
        }
    }

    /// Return all counters to their initial values and reshuffle the deck
    /// under `seed`. The best score is session-external and survives.
    pub fn reset(&mut self, seed: u64) {
        self.rounds.reset(seed);
        self.seed = seed;
        self.phase = SessionPhase::Active;
        self.time_remaining = SESSION_SECONDS;
        self.elapsed_seconds = 0;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.correct_answers = 0;
        self.questions_answered = 0;
        self.streak = 0;
        self.pending_guess = None;
        self.last_message = format::start_message().to_string();
        self.logs.clear();
    }

    fn end(&mut self, reason: EndReason) {
        self.phase = SessionPhase::GameOver(reason);
        self.last_message = format::game_over_message(reason);
        self.push_log(match reason {
            EndReason::TimeUp => LOG_END_TIME,
            EndReason::OutOfLives => LOG_END_LIVES,
            EndReason::DeckExhausted => LOG_END_DECK,
        });
    }

    fn sync_best_score(&mut self) {
        if self.score > self.best_score {
            self.best_score = self.score;
            self.push_log(LOG_BEST_SCORE_UPDATED);
        }
    }

    fn push_log(&mut self, key: &str) {
        self.logs.push(key.to_string());
    }

    /// Accuracy is derived, not stored.
    #[must_use]
    pub fn accuracy_pct(&self) -> u32 {
        if self.questions_answered == 0 {
            return 0;
        }
        let ratio = f64::from(self.correct_answers) / f64::from(self.questions_answered);
        (ratio * 100.0).round() as u32
    }

    /// Seconds of countdown consumed per answered question, from elapsed
    /// ticks rather than wall-clock time.
    #[must_use]
    pub fn avg_seconds_per_question(&self) -> f64 {
        if self.questions_answered == 0 {
            return 0.0;
        }
        f64::from(self.elapsed_seconds) / f64::from(self.questions_answered)
    }

    /// Snapshot sufficient for the display sink to render.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            round_position: self.rounds.position(),
            round_total: self.rounds.total_count(),
            time_remaining: self.time_remaining,
            lives: self.lives,
            score: self.score,
            best_score: self.best_score,
            accuracy_pct: self.accuracy_pct(),
            streak: self.streak,
            avg_seconds_per_question: self.avg_seconds_per_question(),
            last_message: self.last_message.clone(),
        }
    }

    /// The prompt being guessed, for display.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRound` past the end of the deck.
    pub fn current_prompt(&self) -> Result<&Prompt, SessionError> {
        self.rounds.current()
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, SessionPhase::GameOver(_))
    }

    #[must_use]
    pub const fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            SessionPhase::Active => None,
            SessionPhase::GameOver(reason) => Some(reason),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub const fn lives(&self) -> u8 {
        self.lives
    }

    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub const fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub const fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    #[must_use]
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Ticks consumed since the last reset.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// Structured log keys recorded since the last reset.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}
