//! Engine controller
//!
//! Owns the run lifecycle (start/stop/pause/resume/restart), the input
//! adapter and the observer that hears about score, level, lives and game
//! over. The host calls `frame` once per display frame; the engine decides
//! whether the simulation actually advances.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::{ConfigError, InputError};
use crate::input::{InputState, MobileAction, is_jump_key};
use crate::sim::{GameEvent, GameState, RunPhase, tick};

/// Receives state-change notifications, synchronously, in the order they happen
pub trait GameObserver {
    fn on_score_update(&mut self, _score: u64) {}
    fn on_level_update(&mut self, _level: u32) {}
    fn on_lives_update(&mut self, _lives: u32) {}
    fn on_game_over(&mut self) {}
}

impl GameObserver for () {}

/// Observer that records every notification
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn game_overs(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver))
            .count()
    }
}

impl GameObserver for EventLog {
    fn on_score_update(&mut self, score: u64) {
        self.events.push(GameEvent::ScoreChanged(score));
    }

    fn on_level_update(&mut self, level: u32) {
        self.events.push(GameEvent::LevelChanged(level));
    }

    fn on_lives_update(&mut self, lives: u32) {
        self.events.push(GameEvent::LivesChanged(lives));
    }

    fn on_game_over(&mut self) {
        self.events.push(GameEvent::GameOver);
    }
}

/// Final numbers of a run, as shown on the game-over screen and submitted
/// to the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub phase: RunPhase,
    pub ticks: u64,
}

/// Drives a `GameState` from host frames and input events
pub struct Engine<O: GameObserver> {
    state: GameState,
    input: InputState,
    observer: O,
    /// Whether the host should keep scheduling frames
    running: bool,
}

impl<O: GameObserver> Engine<O> {
    /// Build an engine for a fresh run. Fails fast on invalid config.
    pub fn new(config: GameConfig, seed: u64, observer: O) -> Result<Self, ConfigError> {
        let state = GameState::new(config, seed)?;
        log::info!("Engine created with seed: {}", seed);
        Ok(Self {
            state,
            input: InputState::new(),
            observer,
            running: false,
        })
    }

    /// Build an engine seeded from system entropy
    pub fn with_entropy(config: GameConfig, observer: O) -> Result<Self, ConfigError> {
        Self::new(config, rand::random(), observer)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and debugging tools
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.state.phase == RunPhase::Paused
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.state.score,
            level: self.state.level,
            lives: self.state.lives,
            phase: self.state.phase,
            ticks: self.state.time_ticks,
        }
    }

    /// Begin ticking. Returns true if the engine was stopped, meaning the
    /// host has to (re)start its frame loop.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        log::info!("Engine started");
        true
    }

    /// Halt ticking; the host stops scheduling frames
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Engine stopped");
        }
    }

    /// Freeze the simulation. Frames keep coming so the host can still render.
    pub fn pause(&mut self) {
        match self.state.phase {
            RunPhase::Active => {
                self.state.phase = RunPhase::Paused;
                log::info!("Paused");
            }
            RunPhase::Paused => {}
            RunPhase::GameOver => log::warn!("Ignoring pause after game over"),
        }
    }

    pub fn resume(&mut self) {
        match self.state.phase {
            RunPhase::Paused => {
                self.state.phase = RunPhase::Active;
                log::info!("Resumed");
            }
            RunPhase::Active => {}
            RunPhase::GameOver => log::warn!("Ignoring resume after game over"),
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Throw the current run away and begin a new one at level 1.
    ///
    /// Observers are told the fresh score, level and lives. Returns true if
    /// the host has to start its frame loop.
    pub fn restart(&mut self) -> bool {
        let seed = self.state.rng.random();
        self.state = GameState::with_validated(self.state.config, seed);
        self.input.clear();
        log::info!("Game restarted with seed: {}", seed);

        self.observer.on_score_update(self.state.score);
        self.observer.on_level_update(self.state.level);
        self.observer.on_lives_update(self.state.lives);

        self.start()
    }

    /// Record a key press. Returns true for jump keys so the host can
    /// suppress the browser default (page scroll).
    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key);
        if is_jump_key(key) {
            self.jump();
            return true;
        }
        false
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    pub fn handle_mobile_input(&mut self, action: MobileAction) {
        match action {
            MobileAction::Jump => self.jump(),
            other => self.input.apply_mobile(other),
        }
    }

    /// Parse and apply a gesture name such as `"left-start"`
    pub fn handle_mobile_action(&mut self, action: &str) -> Result<(), InputError> {
        let action: MobileAction = action.parse()?;
        self.handle_mobile_input(action);
        Ok(())
    }

    /// Request a jump on the next tick. Dropped while airborne, paused or
    /// after game over, so presses are never buffered.
    pub fn jump(&mut self) {
        if self.state.phase == RunPhase::Active && self.state.player.on_ground {
            self.input.queue_jump();
        }
    }

    /// Run one frame: snapshot input, tick, notify. Returns whether the host
    /// should schedule another frame.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let input = self.input.snapshot();
        let events = tick(&mut self.state, &input);
        for event in events {
            match event {
                GameEvent::ScoreChanged(score) => self.observer.on_score_update(score),
                GameEvent::LevelChanged(level) => self.observer.on_level_update(level),
                GameEvent::LivesChanged(lives) => self.observer.on_lives_update(lives),
                GameEvent::GameOver => {
                    self.observer.on_game_over();
                    self.stop();
                }
            }
        }

        self.running
    }
}
