//! Shape catalog.
//!
//! All 28 shapes (7 kinds x 4 rotation states) live in one shared definition
//! bitmap, each occupying a 4x4 cell at (kind * 4, turn * 4). Looking a shape
//! up means clearing a scratch grid and extracting the cell, which lands the
//! shape anchored at the grid origin ready for shifting into place.

use oled_tetris_grid::BitGrid;
use oled_tetris_types::{MinoKind, Rotation, MINO_CELL};

/// Per-(kind, turn) 4x4 cell as row masks, bit 3 = leftmost column.
/// Kind order matches `MinoKind`; turn order is clockwise quarter turns.
const SHAPES: [[[u8; 4]; 4]; 7] = [
    // I
    [
        [0b0000, 0b1111, 0b0000, 0b0000],
        [0b0010, 0b0010, 0b0010, 0b0010],
        [0b0000, 0b0000, 0b1111, 0b0000],
        [0b0100, 0b0100, 0b0100, 0b0100],
    ],
    // J
    [
        [0b1000, 0b1110, 0b0000, 0b0000],
        [0b0110, 0b0100, 0b0100, 0b0000],
        [0b0000, 0b1110, 0b0010, 0b0000],
        [0b0100, 0b0100, 0b1100, 0b0000],
    ],
    // L
    [
        [0b0010, 0b1110, 0b0000, 0b0000],
        [0b0100, 0b0100, 0b0110, 0b0000],
        [0b0000, 0b1110, 0b1000, 0b0000],
        [0b1100, 0b0100, 0b0100, 0b0000],
    ],
    // O
    [
        [0b0110, 0b0110, 0b0000, 0b0000],
        [0b0110, 0b0110, 0b0000, 0b0000],
        [0b0110, 0b0110, 0b0000, 0b0000],
        [0b0110, 0b0110, 0b0000, 0b0000],
    ],
    // S
    [
        [0b0110, 0b1100, 0b0000, 0b0000],
        [0b0100, 0b0110, 0b0010, 0b0000],
        [0b0000, 0b0110, 0b1100, 0b0000],
        [0b1000, 0b1100, 0b0100, 0b0000],
    ],
    // T
    [
        [0b0100, 0b1110, 0b0000, 0b0000],
        [0b0100, 0b0110, 0b0100, 0b0000],
        [0b0000, 0b1110, 0b0100, 0b0000],
        [0b0100, 0b1100, 0b0100, 0b0000],
    ],
    // Z
    [
        [0b1100, 0b0110, 0b0000, 0b0000],
        [0b0010, 0b0110, 0b0100, 0b0000],
        [0b0000, 0b1100, 0b0110, 0b0000],
        [0b0100, 0b1100, 0b1000, 0b0000],
    ],
];

static MINO_DEFINITION: BitGrid = build_definition();

const fn build_definition() -> BitGrid {
    let mut grid = BitGrid::zeroed();
    let mut kind = 0;
    while kind < SHAPES.len() {
        let mut turn = 0;
        while turn < 4 {
            let mut row = 0;
            while row < 4 {
                let mask = SHAPES[kind][turn][row];
                let mut col = 0;
                while col < 4 {
                    if mask & (0b1000 >> col) != 0 {
                        grid = grid.with_bit(kind * MINO_CELL + row, turn * MINO_CELL + col);
                    }
                    col += 1;
                }
                row += 1;
            }
            turn += 1;
        }
        kind += 1;
    }
    grid
}

/// Shape for (kind, turn), anchored at the grid origin.
pub fn shape_bitmap(kind: MinoKind, turn: Rotation) -> BitGrid {
    let mut out = BitGrid::new();
    write_shape(&mut out, kind, turn);
    out
}

/// Clear `out` and write the shape for (kind, turn) into it, anchored at the
/// grid origin. Allocation-free variant for callers that reuse a scratch grid.
pub fn write_shape(out: &mut BitGrid, kind: MinoKind, turn: Rotation) {
    out.clear();
    let row0 = kind.index() * MINO_CELL;
    let col0 = turn.index() * MINO_CELL;
    out.extract(
        &MINO_DEFINITION,
        col0,
        col0 + MINO_CELL - 1,
        row0,
        row0 + MINO_CELL - 1,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in MinoKind::ALL {
            for turn in Rotation::ALL {
                let shape = shape_bitmap(kind, turn);
                assert_eq!(shape.count_ones(), 4, "{:?} {:?}", kind, turn);
            }
        }
    }

    #[test]
    fn test_shape_is_anchored_in_top_left_cell() {
        for kind in MinoKind::ALL {
            for turn in Rotation::ALL {
                let shape = shape_bitmap(kind, turn);
                let mut outside = 0;
                for row in 0..128 {
                    for col in 0..128 {
                        if shape.read(row, col) && (row >= MINO_CELL || col >= MINO_CELL) {
                            outside += 1;
                        }
                    }
                }
                assert_eq!(outside, 0, "{:?} {:?} spills outside its cell", kind, turn);
            }
        }
    }

    #[test]
    fn test_i_spawn_is_a_horizontal_bar() {
        let shape = shape_bitmap(MinoKind::I, Rotation::R0);
        for col in 0..4 {
            assert!(shape.read(1, col));
        }
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let reference = shape_bitmap(MinoKind::O, Rotation::R0);
        for turn in Rotation::ALL {
            assert_eq!(shape_bitmap(MinoKind::O, turn), reference);
        }
    }

    #[test]
    fn test_quarter_turns_differ_for_t() {
        let r0 = shape_bitmap(MinoKind::T, Rotation::R0);
        let r90 = shape_bitmap(MinoKind::T, Rotation::R90);
        assert_ne!(r0, r90);
    }
}
