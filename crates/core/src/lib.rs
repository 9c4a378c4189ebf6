//! Core game logic - pure, deterministic, and testable
//!
//! Everything behind the per-tick engine call lives here, with no UI or I/O
//! dependencies:
//!
//! - [`catalog`]: all 28 shapes embedded in one shared definition bitmap
//! - [`piece`]: active-piece control (spawn, rotation, auto-repeat, gravity)
//! - [`field`]: the playfield bitmap, row erasure and game-over detection
//! - [`score`]: score/line/level bookkeeping
//! - [`engine`]: the game state machine ticked at 100 Hz
//! - [`rng`]: injectable piece randomness
//! - [`snapshot`]: the per-tick render snapshot handed to the front-end
//!
//! # Example
//!
//! ```
//! use oled_tetris_core::{Engine, RenderSnapshot, SimpleRng};
//! use oled_tetris_types::{GameState, InputSnapshot};
//!
//! let mut engine = Engine::new(Box::new(SimpleRng::new(7)));
//! engine.tick(&InputSnapshot {
//!     confirm_1: true,
//!     ..InputSnapshot::IDLE
//! });
//! engine.tick(&InputSnapshot::IDLE);
//! assert_eq!(engine.game_state(), GameState::Running);
//!
//! let mut snapshot = RenderSnapshot::default();
//! engine.snapshot_into(&mut snapshot);
//! ```

pub mod catalog;
pub mod engine;
pub mod field;
pub mod piece;
pub mod rng;
pub mod score;
pub mod snapshot;

pub use engine::Engine;
pub use field::{ErasedRows, FieldController};
pub use piece::{Piece, PieceController};
pub use rng::{ClockRng, MinoRng, SequenceRng, SimpleRng};
pub use snapshot::RenderSnapshot;
