//! Per-tick render snapshot.
//!
//! The renderer never touches engine internals; once per tick the engine
//! writes everything drawable into a caller-owned [`RenderSnapshot`]. The
//! out-parameter shape lets the render loop reuse one allocation for the two
//! full-grid copies.

use oled_tetris_grid::BitGrid;
use oled_tetris_types::{GameParams, GameState, MinoKind};

#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    /// Box plus locked stack.
    pub field: BitGrid,
    /// Active piece at field coordinates; only meaningful in Running/Paused.
    pub piece: BitGrid,
    /// Free downward steps to the piece's resting place (ghost offset).
    pub landing_distance: u8,
    pub next_kind: MinoKind,
    pub params: GameParams,
    pub state: GameState,
}

impl RenderSnapshot {
    pub fn clear(&mut self) {
        self.field.clear();
        self.piece.clear();
        self.landing_distance = 0;
        self.next_kind = MinoKind::I;
        self.params = GameParams::new_game();
        self.state = GameState::WaitingStart;
    }
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        Self {
            field: BitGrid::new(),
            piece: BitGrid::new(),
            landing_distance: 0,
            next_kind: MinoKind::I,
            params: GameParams::new_game(),
            state: GameState::WaitingStart,
        }
    }
}
