//! Deterministic bot guess policies.
//!
//! Each policy produces guesses at a controlled offset from the true city
//! so that every scoring bracket is reachable on demand. One degree of
//! latitude is roughly 111 km, which is what the offset ranges lean on.

use clap::ValueEnum;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cityguess_game::Prompt;

/// How the bot plays each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GuessStrategy {
    /// Always guess the exact target coordinates.
    Perfect,
    /// Guess within a couple of degrees of the target.
    Nearby,
    /// Guess a random point on the globe.
    Wild,
    /// Skip every round.
    Skipper,
    /// Rotate through the other strategies round by round.
    Mixed,
}

impl GuessStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Nearby => "nearby",
            Self::Wild => "wild",
            Self::Skipper => "skipper",
            Self::Mixed => "mixed",
        }
    }
}

/// One decision for the current round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BotAction {
    Guess { lat: f64, lon: f64 },
    Skip,
}

/// Seeded decision source; identical seeds replay identical sessions.
pub struct GuessBot {
    strategy: GuessStrategy,
    rng: SmallRng,
}

impl GuessBot {
    #[must_use]
    pub fn new(strategy: GuessStrategy, seed: u64) -> Self {
        Self {
            strategy,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn decide(&mut self, prompt: &Prompt, round: usize) -> BotAction {
        match self.strategy {
            GuessStrategy::Perfect => self.perfect(prompt),
            GuessStrategy::Nearby => self.nearby(prompt),
            GuessStrategy::Wild => self.wild(),
            GuessStrategy::Skipper => BotAction::Skip,
            GuessStrategy::Mixed => match round % 4 {
                0 => self.perfect(prompt),
                1 => self.nearby(prompt),
                2 => self.wild(),
                _ => BotAction::Skip,
            },
        }
    }

    fn perfect(&mut self, prompt: &Prompt) -> BotAction {
        match prompt.coords() {
            Some(target) => BotAction::Guess {
                lat: target.lat,
                lon: target.lon,
            },
            // Unscoreable card: submitting anything auto-advances without
            // penalty, so guess the origin rather than burning a skip.
            None => BotAction::Guess { lat: 0.0, lon: 0.0 },
        }
    }

    fn nearby(&mut self, prompt: &Prompt) -> BotAction {
        let Some(target) = prompt.coords() else {
            return BotAction::Guess { lat: 0.0, lon: 0.0 };
        };
        let d_lat: f64 = self.rng.gen_range(-1.5..1.5);
        let d_lon: f64 = self.rng.gen_range(-1.5..1.5);
        BotAction::Guess {
            lat: (target.lat + d_lat).clamp(-90.0, 90.0),
            lon: target.lon + d_lon,
        }
    }

    fn wild(&mut self) -> BotAction {
        BotAction::Guess {
            lat: self.rng.gen_range(-60.0..60.0),
            lon: self.rng.gen_range(-180.0..180.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> Prompt {
        Prompt {
            title: "Third Shore".to_string(),
            country: "France".to_string(),
            city: "Paris".to_string(),
            coordinates: Some([48.8566, 2.3522]),
            poster: String::new(),
        }
    }

    #[test]
    fn perfect_bot_hits_the_target() {
        let mut bot = GuessBot::new(GuessStrategy::Perfect, 1);
        let BotAction::Guess { lat, lon } = bot.decide(&prompt(), 0) else {
            panic!("perfect bot never skips");
        };
        assert!((lat - 48.8566).abs() < 1e-9);
        assert!((lon - 2.3522).abs() < 1e-9);
    }

    #[test]
    fn skipper_always_skips() {
        let mut bot = GuessBot::new(GuessStrategy::Skipper, 1);
        for round in 0..5 {
            assert_eq!(bot.decide(&prompt(), round), BotAction::Skip);
        }
    }

    #[test]
    fn decisions_replay_under_the_same_seed() {
        let mut a = GuessBot::new(GuessStrategy::Wild, 42);
        let mut b = GuessBot::new(GuessStrategy::Wild, 42);
        for round in 0..10 {
            assert_eq!(a.decide(&prompt(), round), b.decide(&prompt(), round));
        }
    }

    #[test]
    fn mixed_bot_rotates_and_eventually_skips() {
        let mut bot = GuessBot::new(GuessStrategy::Mixed, 7);
        assert!(matches!(bot.decide(&prompt(), 0), BotAction::Guess { .. }));
        assert_eq!(bot.decide(&prompt(), 3), BotAction::Skip);
    }
}
