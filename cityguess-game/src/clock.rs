//! Countdown tick delivery.
//!
//! The core contains no timing primitive; an external scheduler calls
//! `deliver` at a one-second cadence. The clock only gates those calls:
//! ticks stop reaching the session once it is over, and ticks scheduled
//! before a restart carry a stale token and are dropped, so a replaced
//! session can never be mutated by a leftover tick source.

use crate::session::GameSession;

/// Capability handed to the scheduler when the clock starts. Tokens from
/// earlier starts are rejected by `deliver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

/// Gate between an external one-second scheduler and a session.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    generation: u64,
    running: bool,
}

impl SessionClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a ticking epoch. Any token from a previous epoch goes stale.
    pub fn start(&mut self) -> TickToken {
        self.generation += 1;
        self.running = true;
        TickToken {
            generation: self.generation,
        }
    }

    /// Stop delivering ticks until the next `start`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Forward one tick to the session. Returns whether the tick was
    /// applied; stale or stopped ticks are dropped. The clock stops
    /// itself as soon as the session terminates.
    pub fn deliver(&mut self, token: TickToken, session: &mut GameSession) -> bool {
        if !self.running || token.generation != self.generation {
            return false;
        }
        session.on_tick();
        if session.is_over() {
            self.running = false;
        }
        true
    }
}
