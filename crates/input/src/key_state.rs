//! Held-key tracker producing per-tick input signals.
//!
//! The session wants level-triggered signals ("is left held this tick?").
//! Terminals report presses, auto-repeats and, only with the keyboard
//! enhancement protocol, releases. Without release events a key counts as
//! released once no press or repeat has arrived for the release timeout.
//! A press released before the next sample still shows up in that sample.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{map_key, Action};
use crate::types::InputSignals;

const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Tracks which actions are currently held
#[derive(Debug, Clone)]
pub struct KeyState {
    /// Last press/repeat per held action, `None` when released
    last_seen: [Option<Instant>; 5],
    /// Pressed since the last sample, even if already released
    tapped: [bool; 5],
    quit: bool,
    release_timeout: Duration,
    /// A release event has been observed; timeouts are no longer needed
    release_events: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            last_seen: [None; 5],
            tapped: [false; 5],
            quit: false,
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            release_events: false,
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    /// Feed one key event; returns the action it mapped to, if any
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Option<Action> {
        let action = map_key(key)?;

        if action == Action::Quit {
            if key.kind != KeyEventKind::Release {
                self.quit = true;
            }
            return Some(action);
        }

        let slot = action.slot()?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen[slot] = Some(now);
                self.tapped[slot] = true;
            }
            KeyEventKind::Release => {
                self.release_events = true;
                self.last_seen[slot] = None;
            }
        }
        Some(action)
    }

    pub fn is_held(&self, action: Action) -> bool {
        action
            .slot()
            .is_some_and(|slot| self.last_seen[slot].is_some())
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Expire stale keys and sample the signals for this tick
    pub fn signals(&mut self, now: Instant) -> InputSignals {
        if !self.release_events {
            let timeout = self.release_timeout;
            for seen in self.last_seen.iter_mut() {
                if seen.is_some_and(|t| now.saturating_duration_since(t) > timeout) {
                    *seen = None;
                }
            }
        }

        let signals = InputSignals {
            left: self.sampled(Action::Left),
            right: self.sampled(Action::Right),
            down: self.sampled(Action::Down),
            rotate: self.sampled(Action::Rotate),
            hold: self.sampled(Action::Hold),
            quit: self.quit,
        };
        self.tapped = [false; 5];
        signals
    }

    /// Held now, or pressed since the previous sample
    fn sampled(&self, action: Action) -> bool {
        action
            .slot()
            .is_some_and(|slot| self.last_seen[slot].is_some() || self.tapped[slot])
    }

    /// Release every key (quit stays requested)
    pub fn reset(&mut self) {
        self.last_seen = [None; 5];
        self.tapped = [false; 5];
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}
