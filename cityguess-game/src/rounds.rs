//! Round sequencing over a shuffled prompt deck.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::prompt::Prompt;
use crate::seed::derive_stream_seed;
use crate::session::SessionError;

const DECK_STREAM_TAG: &[u8] = b"deck";

/// Holds the shuffled prompt sequence and a cursor into it.
///
/// Shuffling is a uniform Fisher-Yates pass through a deterministically
/// seeded RNG, performed once at load. There is no reshuffling mid-session;
/// `reset` rebuilds the order for a new session.
#[derive(Debug, Clone)]
pub struct RoundSequencer {
    prompts: Vec<Prompt>,
    cursor: usize,
}

impl RoundSequencer {
    /// Build a sequencer over the given prompts, shuffled by `seed`.
    #[must_use]
    pub fn new(prompts: Vec<Prompt>, seed: u64) -> Self {
        let mut sequencer = Self { prompts, cursor: 0 };
        sequencer.reset(seed);
        sequencer
    }

    /// Reshuffle the deck under a new seed and rewind the cursor.
    pub fn reset(&mut self, seed: u64) {
        let mut rng = ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, DECK_STREAM_TAG));
        self.prompts.shuffle(&mut rng);
        self.cursor = 0;
    }

    /// The prompt under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveRound` when the deck is empty or the cursor has
    /// passed the last prompt.
    pub fn current(&self) -> Result<&Prompt, SessionError> {
        self.prompts
            .get(self.cursor)
            .ok_or(SessionError::NoActiveRound)
    }

    /// Move the cursor forward one position. Returns `false` once the
    /// cursor passes the last prompt.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.prompts.len() {
            self.cursor += 1;
        }
        self.cursor < self.prompts.len()
    }

    /// Prompts not yet visited, including the current one.
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.prompts.len().saturating_sub(self.cursor)
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.prompts.len()
    }

    /// One-based position for progress display, clamped to the deck size.
    #[must_use]
    pub fn position(&self) -> usize {
        (self.cursor + 1).min(self.prompts.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
