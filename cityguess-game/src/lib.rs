//! CityGuess Game Engine
//!
//! Platform-agnostic core game logic for the CityGuess geography guessing
//! game: a player is shown a media title and clicks a world map to guess
//! the city it was filmed in. This crate owns round sequencing, distance
//! scoring, lives/streak/accuracy bookkeeping, and session termination,
//! without UI or platform-specific dependencies.

pub mod clock;
pub mod constants;
pub mod format;
pub mod geo;
pub mod prompt;
pub mod rounds;
pub mod scoring;
pub mod seed;
pub mod session;

// Re-export commonly used types
pub use clock::{SessionClock, TickToken};
pub use geo::haversine_km;
pub use prompt::{Coords, Prompt, PromptSet};
pub use rounds::RoundSequencer;
pub use scoring::{ScoringOutcome, evaluate};
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use session::{
    EndReason, GameSession, SessionError, SessionPhase, SessionSnapshot, SubmitOutcome,
};

/// Trait for abstracting prompt loading operations.
/// Platform-specific implementations should provide this.
pub trait PromptSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the prompt collection from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt data cannot be loaded.
    fn load_prompts(&self) -> Result<PromptSet, Self::Error>;
}

/// Trait for abstracting best-score persistence.
/// Platform-specific implementations should provide this.
pub trait BestScoreStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the persisted best score, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load_best(&self) -> Result<Option<u32>, Self::Error>;

    /// Persist a new best score.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn save_best(&self, best: u32) -> Result<(), Self::Error>;
}

/// Main game engine binding a prompt source to a best-score store.
pub struct GameEngine<L, S>
where
    L: PromptSource,
    S: BestScoreStore,
{
    prompt_source: L,
    score_store: S,
}

impl<L, S> GameEngine<L, S>
where
    L: PromptSource,
    S: BestScoreStore,
{
    /// Create a new engine with the provided prompt source and score store.
    pub const fn new(prompt_source: L, score_store: S) -> Self {
        Self {
            prompt_source,
            score_store,
        }
    }

    /// Start a fresh session with the specified seed.
    ///
    /// Loads prompts, normalizes poster references, seeds the best score
    /// from the store (default 0 when absent), and shuffles the deck.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt data or stored best score cannot be
    /// loaded, or if the prompt collection is empty.
    pub fn start_session(&self, seed: u64) -> Result<GameSession, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        let mut prompts = self.prompt_source.load_prompts().map_err(Into::into)?;
        prompts.normalize_poster_paths();
        let best = self.score_store.load_best().map_err(Into::into)?.unwrap_or(0);
        GameSession::new(prompts.into_prompts(), seed, best).map_err(Into::into)
    }

    /// Persist the session's best score when it beats the stored value.
    /// Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn record_best(&self, session: &GameSession) -> Result<bool, S::Error> {
        let stored = self.score_store.load_best()?.unwrap_or(0);
        if session.best_score() > stored {
            self.score_store.save_best(session.best_score())?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Copy, Default)]
    struct FixtureSource;

    impl PromptSource for FixtureSource {
        type Error = Infallible;

        fn load_prompts(&self) -> Result<PromptSet, Self::Error> {
            Ok(PromptSet::load_from_static())
        }
    }

    #[derive(Clone, Copy, Default)]
    struct EmptySource;

    impl PromptSource for EmptySource {
        type Error = Infallible;

        fn load_prompts(&self) -> Result<PromptSet, Self::Error> {
            Ok(PromptSet::empty())
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStore {
        best: Rc<Cell<Option<u32>>>,
    }

    impl BestScoreStore for MemoryStore {
        type Error = Infallible;

        fn load_best(&self) -> Result<Option<u32>, Self::Error> {
            Ok(self.best.get())
        }

        fn save_best(&self, best: u32) -> Result<(), Self::Error> {
            self.best.set(Some(best));
            Ok(())
        }
    }

    #[test]
    fn engine_starts_session_with_stored_best() {
        let store = MemoryStore::default();
        store.best.set(Some(420));
        let engine = GameEngine::new(FixtureSource, store);

        let session = engine.start_session(0xABCD).unwrap();
        assert_eq!(session.best_score(), 420);
        assert!(!session.is_over());
        let prompt = session.current_prompt().unwrap();
        assert!(
            prompt.poster.is_empty() || prompt.poster.starts_with("img/series/"),
            "engine normalizes poster paths"
        );
    }

    #[test]
    fn engine_surfaces_empty_collection_as_no_rounds() {
        let engine = GameEngine::new(EmptySource, MemoryStore::default());
        let err = engine.start_session(1).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SessionError>(),
            Some(&SessionError::NoPrompts)
        );
    }

    #[test]
    fn record_best_writes_only_improvements() {
        let store = MemoryStore::default();
        let engine = GameEngine::new(FixtureSource, store.clone());

        let mut session = engine.start_session(7).unwrap();
        assert!(!engine.record_best(&session).unwrap(), "nothing to record yet");

        // Play one perfect round to raise the session best.
        while session.current_prompt().unwrap().coords().is_none() {
            session.skip();
        }
        let target = session.current_prompt().unwrap().coords().unwrap();
        session.place_guess(target.lat, target.lon);
        session.submit_guess().unwrap();

        assert!(engine.record_best(&session).unwrap());
        assert_eq!(store.best.get(), Some(session.best_score()));
        assert!(!engine.record_best(&session).unwrap(), "no double write");
    }
}
