//! Active-piece control.
//!
//! The falling piece is a full 128x128 bitmap holding just the shape, kept in
//! field coordinates and moved with whole-grid shifts. Every move is a
//! copy-shift-test-commit against the field bitmap, so the field's walls and
//! floor are the only collision geometry there is.

use oled_tetris_grid::BitGrid;
use oled_tetris_types::{
    InputSnapshot, MinoKind, Rotation, DROP_THRESHOLD, FREE_FALL_COEFFICIENT, LANDING_SCAN_CAP,
    MOVE_LEFT_THRESHOLD, MOVE_RIGHT_THRESHOLD, SPAWN_DROP_STEPS, SPAWN_SHIFT_X,
};

use crate::catalog;
use crate::rng::MinoRng;

/// The active piece: its shape rendered at field coordinates plus the
/// bookkeeping the renderer wants.
#[derive(Debug, Clone)]
pub struct Piece {
    pub bitmap: BitGrid,
    pub x: i32,
    pub y: i32,
    pub kind: MinoKind,
    pub turn: Rotation,
    /// Free downward steps before the piece would rest, from the last
    /// prediction pass.
    pub landing_distance: u8,
}

impl Piece {
    fn new(kind: MinoKind) -> Self {
        Self {
            bitmap: catalog::shape_bitmap(kind, Rotation::R0),
            x: 0,
            y: 0,
            kind,
            turn: Rotation::R0,
            landing_distance: 0,
        }
    }
}

/// Drives the active piece each tick: spawn placement, rotation, auto-repeat
/// lateral movement, gravity and the fast-drop latch.
pub struct PieceController {
    piece: Piece,
    next_kind: MinoKind,
    spawn_pending: bool,
    counter_left: u32,
    counter_right: u32,
    counter_down: u32,
    /// False from spawn until the down input is seen released once. Keeps a
    /// held fast-drop from carrying over and slamming the next piece.
    allow_fast_drop: bool,
    rng: Box<dyn MinoRng>,
}

impl PieceController {
    pub fn new(mut rng: Box<dyn MinoRng>) -> Self {
        let next_kind = rng.next_kind();
        Self {
            piece: Piece::new(next_kind),
            next_kind,
            spawn_pending: true,
            counter_left: 0,
            counter_right: 0,
            counter_down: 0,
            allow_fast_drop: false,
            rng,
        }
    }

    /// Back to run-start state; the first tick of the new run spawns.
    pub fn reset(&mut self) {
        self.next_kind = self.rng.next_kind();
        self.spawn_pending = true;
        self.counter_left = 0;
        self.counter_right = 0;
        self.counter_down = 0;
        self.allow_fast_drop = false;
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn piece_mut(&mut self) -> &mut Piece {
        &mut self.piece
    }

    pub fn next_kind(&self) -> MinoKind {
        self.next_kind
    }

    pub fn spawn_pending(&self) -> bool {
        self.spawn_pending
    }

    pub fn request_spawn(&mut self) {
        self.spawn_pending = true;
    }

    /// Materialize the queued kind at the spawn position: lateral shift to the
    /// field center, then up to five single-row drops, stopping early at the
    /// first collision. A freshly locked stack near the top simply leaves the
    /// piece higher; the game-over test is the field's job.
    pub fn spawn(&mut self, field: &BitGrid) {
        let kind = self.next_kind;
        self.next_kind = self.rng.next_kind();

        let mut piece = Piece::new(kind);
        piece.bitmap.shift(SPAWN_SHIFT_X, 0);
        piece.x = SPAWN_SHIFT_X;
        self.piece = piece;

        for _ in 0..SPAWN_DROP_STEPS {
            if !self.shift_piece(field, 0, 1) {
                break;
            }
        }

        self.spawn_pending = false;
        self.counter_down = 0;
        self.allow_fast_drop = false;
        self.predict_landing(field);
    }

    /// Try to move the piece by (dx, dy). Commits and returns true only when
    /// the shifted shape does not overlap the field.
    pub fn shift_piece(&mut self, field: &BitGrid, dx: i32, dy: i32) -> bool {
        let mut probe = self.piece.bitmap.clone();
        probe.shift(dx, dy);
        if probe.overlaps(field) {
            return false;
        }
        self.piece.bitmap = probe;
        self.piece.x += dx;
        self.piece.y += dy;
        true
    }

    /// Apply this tick's rotation input. Right and left cancel; the candidate
    /// orientation is rendered at the same anchor and rejected outright on
    /// overlap. No wall kicks.
    pub fn rotate(&mut self, field: &BitGrid, input: &InputSnapshot) {
        let delta = i32::from(input.turn_right) - i32::from(input.turn_left);
        if delta == 0 {
            return;
        }
        let turn = self.piece.turn.turned_by(delta);
        let mut candidate = catalog::shape_bitmap(self.piece.kind, turn);
        candidate.shift(self.piece.x, self.piece.y);
        if candidate.overlaps(field) {
            return;
        }
        self.piece.bitmap = candidate;
        self.piece.turn = turn;
    }

    /// Apply this tick's movement input and gravity. Returns true when a
    /// gravity step collided, i.e. the piece has landed and must be locked.
    pub fn step_move(&mut self, field: &BitGrid, input: &InputSnapshot, level: u8) -> bool {
        if input.left {
            self.counter_left += 1;
        } else {
            self.counter_left = 0;
        }
        if self.counter_left > MOVE_LEFT_THRESHOLD {
            self.counter_left = 0;
            self.shift_piece(field, -1, 0);
        }

        if input.right {
            self.counter_right += 1;
        } else {
            self.counter_right = 0;
        }
        if self.counter_right > MOVE_RIGHT_THRESHOLD {
            self.counter_right = 0;
            self.shift_piece(field, 1, 0);
        }

        let coefficient = FREE_FALL_COEFFICIENT[usize::from(level.min(9))];
        if !self.allow_fast_drop && input.down {
            // Down has been held since before this piece spawned; fall at the
            // normal rate until it is released once.
            self.counter_down += coefficient;
        } else {
            self.allow_fast_drop = true;
            self.counter_down = if input.down {
                DROP_THRESHOLD + 1
            } else {
                self.counter_down + coefficient
            };
        }

        let mut locked = false;
        if self.counter_down > DROP_THRESHOLD {
            self.counter_down = 0;
            if !self.shift_piece(field, 0, 1) {
                locked = true;
            }
        }
        locked
    }

    /// Count how many free downward steps remain before the piece rests,
    /// capped to guard against a malformed field with no floor.
    pub fn predict_landing(&mut self, field: &BitGrid) {
        let mut probe = self.piece.bitmap.clone();
        let mut distance: u8 = 0;
        loop {
            probe.shift(0, 1);
            if probe.overlaps(field) || distance >= LANDING_SCAN_CAP {
                break;
            }
            distance += 1;
        }
        self.piece.landing_distance = distance;
    }
}
