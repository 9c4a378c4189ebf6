//! Terminal input layer: crossterm key events in, per-tick
//! [`InputSnapshot`](oled_tetris_types::InputSnapshot)s out.

pub mod map;
pub mod tracker;

pub use map::{is_pause_key, pad_key, should_quit, PadKey};
pub use tracker::InputTracker;
