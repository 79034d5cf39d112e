//! Session configuration

use thiserror::Error;

use crate::types::{INITIAL_SPEED, LINE_CLEAR_DELAY_TICKS, MIN_SPEED, PIECES_PER_SPEED_STEP};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial speed must be at least 1, got {0}")]
    SpeedTooLow(u32),
    #[error("pieces per speed step must be at least 1")]
    ZeroSpeedStep,
}

/// Tunables for a [`Session`](crate::Session)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seed of the piece generator
    pub seed: u32,
    /// Ticks per gravity step at the start
    pub initial_speed: u32,
    /// Locks between speed increases
    pub pieces_per_speed_step: u32,
    /// Ticks marked lines stay on the field before collapsing
    pub line_clear_delay_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            initial_speed: INITIAL_SPEED,
            pieces_per_speed_step: PIECES_PER_SPEED_STEP,
            line_clear_delay_ticks: LINE_CLEAR_DELAY_TICKS,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_initial_speed(mut self, speed: u32) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_pieces_per_speed_step(mut self, pieces: u32) -> Self {
        self.pieces_per_speed_step = pieces;
        self
    }

    pub fn with_line_clear_delay_ticks(mut self, ticks: u32) -> Self {
        self.line_clear_delay_ticks = ticks;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_speed < MIN_SPEED {
            return Err(ConfigError::SpeedTooLow(self.initial_speed));
        }
        if self.pieces_per_speed_step == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }
        Ok(())
    }
}
