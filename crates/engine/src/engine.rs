//! Engine façade: one owned game plus the clock used for the exit notice.
//!
//! Hosts call [`Engine::tick`] once per frame and [`Engine::command`] for each
//! discrete input, both from the same execution context, and hand
//! [`Engine::snapshot`] to their renderer.

use rand::RngCore;
use rand_chacha::ChaCha8Rng;

use crate::clock::{Clock, MonotonicClock};
use crate::core::{ConfigError, EngineConfig, GameSnapshot, GameState, PieceGenerator};
use crate::types::Command;

#[derive(Debug, Clone)]
pub struct Engine<C = MonotonicClock, R = ChaCha8Rng> {
    state: GameState<R>,
    clock: C,
}

impl Engine<MonotonicClock, ChaCha8Rng> {
    /// Build an idle engine; invalid configurations are rejected here, never later
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> Engine<C, ChaCha8Rng> {
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(&config)?,
            clock,
        })
    }
}

impl<C: Clock, R: RngCore> Engine<C, R> {
    /// Build an engine around an injected random source
    pub fn with_generator(
        config: EngineConfig,
        clock: C,
        generator: PieceGenerator<R>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::with_generator(&config, generator)?,
            clock,
        })
    }

    /// Advance gravity (and any lock/clear/spawn it triggers) by `delta_ms`
    pub fn tick(&mut self, delta_ms: u32) {
        self.state.tick(delta_ms);
    }

    /// Apply a discrete command; commands the current phase does not accept are ignored
    pub fn command(&mut self, command: Command) {
        let now = self.clock.now_ms();
        self.state.apply_command(command, now);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    /// Whether the exit notice should be on screen right now
    pub fn notice_visible(&self) -> bool {
        self.state.notice_visible(self.clock.now_ms())
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    /// Direct state access for scripted scenarios and tooling
    pub fn state_mut(&mut self) -> &mut GameState<R> {
        &mut self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
