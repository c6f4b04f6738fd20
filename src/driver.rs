//! Frame driver
//!
//! Owns the session and runs one tick per host frame. The host scheduler is
//! abstracted behind `FrameScheduler`, so tests can single-step frames.

use crate::config::GameConfig;
use crate::render::{self, Surface};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Host per-frame callback scheduler
pub trait FrameScheduler {
    /// Ask the host to call back once, around the next display refresh
    fn request_next_frame(&mut self);
}

/// Scheduler that records requests for the host to poll
#[derive(Debug, Clone, Default)]
pub struct FrameRequest {
    pending: bool,
    /// Requests over the scheduler lifetime
    pub total: u64,
}

impl FrameRequest {
    /// Consume the pending request, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl FrameScheduler for FrameRequest {
    fn request_next_frame(&mut self) {
        self.pending = true;
        self.total += 1;
    }
}

/// Session state machine: Idle -> Running -> GameOver
#[derive(Debug)]
pub struct FrameDriver {
    state: GameState,
    running: bool,
}

impl FrameDriver {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::from_state(GameState::new(config, seed))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            running: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin the session; ignored unless still idle
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.running || self.state.phase != GamePhase::Idle {
            log::warn!("Start ignored in phase {:?}", self.state.phase);
            return false;
        }

        self.state.phase = GamePhase::Running;
        self.running = true;
        let lives = self.state.lives.value();
        match self.state.seed {
            Some(seed) => log::info!("Session started (seed {}, {} lives)", seed, lives),
            None => log::info!("Session started (injected rng, {} lives)", lives),
        }
        scheduler.request_next_frame();
        true
    }

    /// Stop requesting frames; the in-flight frame (if any) becomes a no-op
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Session stopped at tick {}", self.state.time_ticks);
        }
        self.running = false;
    }

    /// Replace the session with a fresh one in `Idle`, same config
    ///
    /// Drops any running session; the host calls `start` again to play.
    pub fn restart(&mut self, seed: u64) {
        self.running = false;
        self.state = GameState::new(self.state.config.clone(), seed);
        log::info!("New session ready (seed {})", seed);
    }

    /// Run one tick and draw it
    ///
    /// Returns the notifications raised during the tick.
    pub fn frame(
        &mut self,
        input: &TickInput,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }

        surface.clear(self.state.bounds());
        tick(&mut self.state, input);
        render::draw_scene(&self.state, surface);

        if self.state.phase == GamePhase::GameOver {
            self.running = false;
        }
        if self.running {
            scheduler.request_next_frame();
        }

        self.state.drain_events()
    }
}
