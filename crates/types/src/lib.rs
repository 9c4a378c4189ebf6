//! Shared types for the OLED Tetris engine.
//!
//! Pure data types and tuning constants with no external dependencies.
//! Everything here is shared between the engine core, the input layer and the
//! renderer, so it stays free of any I/O concerns.

/// Logic tick period in milliseconds (the game loop runs at 100 Hz).
pub const TICK_MS: u64 = 10;

/// Sustained lateral input must exceed these tick counts before the piece
/// steps one cell (auto-repeat-after-delay, not per-press stepping).
pub const MOVE_LEFT_THRESHOLD: u32 = 2;
pub const MOVE_RIGHT_THRESHOLD: u32 = 2;

/// Gravity accumulator threshold; a down step happens when the accumulator
/// exceeds this value.
pub const DROP_THRESHOLD: u32 = 100;

/// Per-tick gravity increment, indexed by level (1..=9). Index 0 is unused.
pub const FREE_FALL_COEFFICIENT: [u32; 10] = [0, 5, 7, 10, 13, 16, 21, 26, 34, 51];

/// Maximum rows a single lock can erase.
pub const MAX_ERASE_ROWS: usize = 4;

/// Score rate by erased-row count: `rate[n] * n * (9 + level)` points.
pub const ROW_SCORE_RATE: [u32; 5] = [0, 10, 13, 20, 30];

/// Cumulative line counts required to leave each level (indexed by level).
pub const NEXT_LEVEL_LINES: [u32; 9] = [0, 3, 6, 9, 13, 17, 21, 28, 35];

pub const MAX_LEVEL: u8 = 9;

/// Spawn placement: lateral shift to the playfield center, then up to
/// `SPAWN_DROP_STEPS` single-row downward shifts (stopping on collision).
pub const SPAWN_SHIFT_X: i32 = 4;
pub const SPAWN_DROP_STEPS: u32 = 5;

/// Landing-distance prediction iteration cap (infinite-loop guard).
pub const LANDING_SCAN_CAP: u8 = 127;

/// Playfield geometry inside the 128x128 grid. The box occupies the top-left
/// corner: walls at columns 0 and 11, floor at row 24. Rows 0..=3 are spawn
/// buffer, rows 4..=5 the game-over band, rows 6..=23 the clearable range.
pub const FIELD_COL_LEFT_WALL: usize = 0;
pub const FIELD_COL_RIGHT_WALL: usize = 11;
pub const FIELD_COL_FIRST: usize = 1;
pub const FIELD_COLS: usize = 10;
pub const FIELD_ROW_FLOOR: usize = 24;
pub const ERASE_ROW_TOP: usize = 6;
pub const ERASE_ROW_BOTTOM: usize = 23;
pub const SENTINEL_ROW_TOP: usize = 4;
pub const SENTINEL_ROWS: usize = 2;

/// Edge length of one shape cell in the packed definition bitmap.
pub const MINO_CELL: usize = 4;

pub const MINO_KIND_COUNT: usize = 7;

/// The seven tetromino kinds. The discriminant order is load-bearing: the
/// randomness collaborator produces indices in 0..7 and `from_index` must map
/// them the same way the shape definition bitmap is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinoKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl MinoKind {
    pub const ALL: [MinoKind; MINO_KIND_COUNT] = [
        MinoKind::I,
        MinoKind::J,
        MinoKind::L,
        MinoKind::O,
        MinoKind::S,
        MinoKind::T,
        MinoKind::Z,
    ];

    /// Map an arbitrary index onto a kind (reduced modulo 7).
    pub const fn from_index(index: u32) -> MinoKind {
        Self::ALL[(index % MINO_KIND_COUNT as u32) as usize]
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Rotation state of a piece, in clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rotation state after `delta` clockwise quarter turns (negative turns
    /// counter-clockwise).
    pub fn turned_by(self, delta: i32) -> Rotation {
        let idx = (self.index() as i32 + delta).rem_euclid(4);
        Self::ALL[idx as usize]
    }
}

/// Externally visible game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    WaitingStart,
    Initializing,
    Running,
    GameOver,
    Paused,
}

/// Per-tick input snapshot handed to the engine by the input collaborator.
///
/// Stick directions are level-triggered (true for as long as the stick is
/// deflected); the button fields are edge-triggered and must be true only on
/// the tick the button transitions released -> pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub turn_right: bool,
    pub turn_left: bool,
    pub confirm_1: bool,
    pub confirm_2: bool,
}

impl InputSnapshot {
    pub const IDLE: InputSnapshot = InputSnapshot {
        left: false,
        right: false,
        up: false,
        down: false,
        turn_right: false,
        turn_left: false,
        confirm_1: false,
        confirm_2: false,
    };
}

/// Score/level bookkeeping, read by the renderer each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameParams {
    pub level: u8,
    pub lines: u32,
    pub score: u32,
    /// True when the last lock changed any of the fields above; the renderer
    /// uses it to skip redrawing the score panel.
    pub updated: bool,
}

impl GameParams {
    /// Run-start values. `updated` starts true so the first frame draws the UI.
    pub fn new_game() -> Self {
        Self {
            level: 1,
            lines: 0,
            score: 0,
            updated: true,
        }
    }
}

impl Default for GameParams {
    fn default() -> Self {
        Self::new_game()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_index_wraps_modulo_seven() {
        assert_eq!(MinoKind::from_index(0), MinoKind::I);
        assert_eq!(MinoKind::from_index(6), MinoKind::Z);
        assert_eq!(MinoKind::from_index(7), MinoKind::I);
        assert_eq!(MinoKind::from_index(12), MinoKind::T);
    }

    #[test]
    fn test_rotation_turned_by() {
        assert_eq!(Rotation::R0.turned_by(1), Rotation::R90);
        assert_eq!(Rotation::R0.turned_by(-1), Rotation::R270);
        assert_eq!(Rotation::R270.turned_by(1), Rotation::R0);
        assert_eq!(Rotation::R90.turned_by(0), Rotation::R90);
        assert_eq!(Rotation::R180.turned_by(4), Rotation::R180);
    }

    #[test]
    fn test_free_fall_table_increases_with_level() {
        for level in 1..9 {
            assert!(FREE_FALL_COEFFICIENT[level] < FREE_FALL_COEFFICIENT[level + 1]);
        }
    }

    #[test]
    fn test_new_game_params() {
        let params = GameParams::new_game();
        assert_eq!(params.level, 1);
        assert_eq!(params.lines, 0);
        assert_eq!(params.score, 0);
        assert!(params.updated);
    }
}
