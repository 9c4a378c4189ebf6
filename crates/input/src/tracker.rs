//! Folds terminal key events into the engine's per-tick input snapshot.
//!
//! The engine models a gamepad: stick directions are level-triggered (true
//! for as long as the stick is deflected), rotate and confirm buttons are
//! edge-triggered. Terminals complicate both halves. Held keys arrive as
//! repeated press events, and many terminals never emit release events at
//! all, so a stick direction is considered held from its last press event
//! until either a release event or a short timeout. Button presses are
//! latched and handed out exactly once, on the next snapshot.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use oled_tetris_types::InputSnapshot;

use crate::map::{pad_key, PadKey};

// In terminals without key-release events, a short timeout prevents a single
// tap from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone, Copy)]
struct StickAxis {
    held: bool,
    last_press: Instant,
}

impl StickAxis {
    fn new() -> Self {
        Self {
            held: false,
            last_press: Instant::now(),
        }
    }

    fn press(&mut self) {
        self.held = true;
        self.last_press = Instant::now();
    }

    fn release(&mut self) {
        self.held = false;
    }

    fn is_held(&mut self, now: Instant, timeout: Duration) -> bool {
        if self.held && now.duration_since(self.last_press) > timeout {
            self.held = false;
        }
        self.held
    }
}

#[derive(Debug, Clone)]
pub struct InputTracker {
    left: StickAxis,
    right: StickAxis,
    up: StickAxis,
    down: StickAxis,
    pending_turn_right: bool,
    pending_turn_left: bool,
    pending_confirm_1: bool,
    pending_confirm_2: bool,
    release_timeout: Duration,
}

impl InputTracker {
    pub fn new() -> Self {
        Self {
            left: StickAxis::new(),
            right: StickAxis::new(),
            up: StickAxis::new(),
            down: StickAxis::new(),
            pending_turn_right: false,
            pending_turn_left: false,
            pending_confirm_1: false,
            pending_confirm_2: false,
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    pub fn key_press(&mut self, code: KeyCode) {
        match pad_key(code) {
            Some(PadKey::Left) => self.left.press(),
            Some(PadKey::Right) => self.right.press(),
            Some(PadKey::Up) => self.up.press(),
            Some(PadKey::Down) => self.down.press(),
            Some(PadKey::TurnRight) => self.pending_turn_right = true,
            Some(PadKey::TurnLeft) => self.pending_turn_left = true,
            Some(PadKey::Confirm1) => self.pending_confirm_1 = true,
            Some(PadKey::Confirm2) => self.pending_confirm_2 = true,
            None => {}
        }
    }

    pub fn key_release(&mut self, code: KeyCode) {
        match pad_key(code) {
            Some(PadKey::Left) => self.left.release(),
            Some(PadKey::Right) => self.right.release(),
            Some(PadKey::Up) => self.up.release(),
            Some(PadKey::Down) => self.down.release(),
            _ => {}
        }
    }

    /// Produce this tick's snapshot. Button edges latched since the previous
    /// call are emitted once and cleared.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let now = Instant::now();
        let snapshot = InputSnapshot {
            left: self.left.is_held(now, self.release_timeout),
            right: self.right.is_held(now, self.release_timeout),
            up: self.up.is_held(now, self.release_timeout),
            down: self.down.is_held(now, self.release_timeout),
            turn_right: self.pending_turn_right,
            turn_left: self.pending_turn_left,
            confirm_1: self.pending_confirm_1,
            confirm_2: self.pending_confirm_2,
        };
        self.pending_turn_right = false;
        self.pending_turn_left = false;
        self.pending_confirm_1 = false;
        self.pending_confirm_2 = false;
        snapshot
    }

    pub fn reset(&mut self) {
        *self = Self::new().with_release_timeout(self.release_timeout);
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}
