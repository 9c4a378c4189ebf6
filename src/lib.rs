//! OLED Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one roof so downstream code and the
//! default binary can use `oled_tetris::{core,grid,input,term,types}` paths
//! while the implementation lives in dedicated crates under `crates/`.

pub use oled_tetris_core as core;
pub use oled_tetris_grid as grid;
pub use oled_tetris_input as input;
pub use oled_tetris_term as term;
pub use oled_tetris_types as types;
