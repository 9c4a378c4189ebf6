//! Field (playfield) state.
//!
//! The field is a single bitmap carrying both the static box (walls and
//! floor) and the locked stack; there is no separate occupancy array. The box
//! is what stops pieces at the edges, so collision checks are nothing more
//! than bitmap overlap. A fixed sentinel bitmap over the rows just above the
//! play area detects game over.

use arrayvec::ArrayVec;
use oled_tetris_grid::BitGrid;
use oled_tetris_types::{
    ERASE_ROW_BOTTOM, ERASE_ROW_TOP, FIELD_COLS, FIELD_COL_FIRST, FIELD_COL_LEFT_WALL,
    FIELD_COL_RIGHT_WALL, FIELD_ROW_FLOOR, MAX_ERASE_ROWS, SENTINEL_ROWS, SENTINEL_ROW_TOP,
};

/// Rows erased by one lock, bottom-most first.
pub type ErasedRows = ArrayVec<usize, MAX_ERASE_ROWS>;

pub struct FieldController {
    bitmap: BitGrid,
    sentinel: BitGrid,
}

impl FieldController {
    pub fn new() -> Self {
        let mut sentinel = BitGrid::new();
        sentinel.fill_rect(FIELD_COL_FIRST, SENTINEL_ROW_TOP, FIELD_COLS, SENTINEL_ROWS);
        let mut field = Self {
            bitmap: BitGrid::new(),
            sentinel,
        };
        field.reset();
        field
    }

    /// Clear the stack and redraw the box.
    pub fn reset(&mut self) {
        self.bitmap.clear();
        self.bitmap
            .vertical_line(FIELD_COL_LEFT_WALL, 0, FIELD_ROW_FLOOR + 1);
        self.bitmap
            .vertical_line(FIELD_COL_RIGHT_WALL, 0, FIELD_ROW_FLOOR + 1);
        self.bitmap
            .horizontal_line(FIELD_COL_LEFT_WALL, FIELD_ROW_FLOOR, FIELD_COL_RIGHT_WALL + 1);
    }

    pub fn bitmap(&self) -> &BitGrid {
        &self.bitmap
    }

    pub fn bitmap_mut(&mut self) -> &mut BitGrid {
        &mut self.bitmap
    }

    /// Merge a landed piece into the stack and collapse any completed rows.
    /// The piece bitmap is cleared: after a lock the blocks live only in the
    /// field. Returns the erased row indices (bottom-most first, at most
    /// four).
    pub fn lock(&mut self, piece_bitmap: &mut BitGrid) -> ErasedRows {
        self.bitmap.or(piece_bitmap);
        piece_bitmap.clear();
        self.erase_full_rows()
    }

    /// Bottom-to-top scan over the clearable band. Collapsing copies each
    /// whole row (walls included) from the row above, then re-tests the same
    /// row index, so stacked full rows clear in one pass.
    fn erase_full_rows(&mut self) -> ErasedRows {
        let mut erased = ErasedRows::new();
        let mut row = ERASE_ROW_BOTTOM;
        while row >= ERASE_ROW_TOP {
            if self.row_is_full(row) {
                for dst in (ERASE_ROW_TOP..=row).rev() {
                    self.bitmap.copy_row(dst, dst - 1);
                }
                if !erased.is_full() {
                    erased.push(row);
                }
            } else {
                row -= 1;
            }
        }
        erased
    }

    fn row_is_full(&self, row: usize) -> bool {
        (FIELD_COL_FIRST..FIELD_COL_FIRST + FIELD_COLS).all(|col| self.bitmap.read(row, col))
    }

    /// True when the stack has grown into the sentinel band above the
    /// clearable rows. Only called right after a lock.
    pub fn is_game_over(&self) -> bool {
        self.bitmap.overlaps(&self.sentinel)
    }
}

impl Default for FieldController {
    fn default() -> Self {
        Self::new()
    }
}
