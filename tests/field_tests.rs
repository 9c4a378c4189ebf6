//! Field erase and game-over tests.

use oled_tetris::core::FieldController;
use oled_tetris::grid::BitGrid;
use oled_tetris::types::{FIELD_COLS, FIELD_COL_FIRST};

fn fill_row(piece: &mut BitGrid, row: usize, skip: &[usize]) {
    for col in FIELD_COL_FIRST..FIELD_COL_FIRST + FIELD_COLS {
        if !skip.contains(&col) {
            piece.write(row, col, true);
        }
    }
}

#[test]
fn test_quad_erase_from_a_vertical_bar() {
    let mut field = FieldController::new();
    // Four almost-full rows with a one-column well.
    for row in 20..=23 {
        let mut filler = BitGrid::new();
        fill_row(&mut filler, row, &[5]);
        field.lock(&mut filler);
    }

    // The vertical bar drops into the well and completes all four.
    let mut bar = BitGrid::new();
    for row in 20..=23 {
        bar.write(row, 5, true);
    }
    let erased = field.lock(&mut bar);
    assert_eq!(erased.len(), 4);

    // The whole play area is empty again.
    for row in 6..=23 {
        for col in FIELD_COL_FIRST..FIELD_COL_FIRST + FIELD_COLS {
            assert!(!field.bitmap().read(row, col), "({}, {})", row, col);
        }
    }
    assert!(!field.is_game_over());
}

#[test]
fn test_separated_full_rows_both_erase() {
    let mut field = FieldController::new();
    let mut piece = BitGrid::new();
    fill_row(&mut piece, 23, &[]);
    fill_row(&mut piece, 21, &[]);
    piece.write(22, 4, true);

    let erased = field.lock(&mut piece);
    assert_eq!(erased.len(), 2);
    // The partial row fell two rows to the bottom.
    assert!(field.bitmap().read(23, 4));
    assert!(!field.bitmap().read(22, 4));
    assert!(!field.bitmap().read(21, 4));
}

#[test]
fn test_erase_leaves_rows_above_untouched() {
    let mut field = FieldController::new();
    let mut piece = BitGrid::new();
    fill_row(&mut piece, 23, &[]);
    piece.write(10, 3, true);
    piece.write(15, 7, true);

    field.lock(&mut piece);
    // Everything above the cleared row shifted down exactly one.
    assert!(field.bitmap().read(11, 3));
    assert!(field.bitmap().read(16, 7));
    assert!(!field.bitmap().read(10, 3));
    assert!(!field.bitmap().read(15, 7));
}

#[test]
fn test_floor_row_never_erases() {
    let mut field = FieldController::new();
    // Row 24 is the solid floor; a full scan must not treat it as clearable.
    let erased = field.lock(&mut BitGrid::new());
    assert!(erased.is_empty());
    for col in 0..=11 {
        assert!(field.bitmap().read(24, col));
    }
}

#[test]
fn test_lock_into_the_sentinel_band_is_game_over() {
    let mut field = FieldController::new();
    let mut piece = BitGrid::new();
    piece.write(5, 5, true);
    piece.write(6, 5, true);
    field.lock(&mut piece);
    assert!(field.is_game_over());

    field.reset();
    assert!(!field.is_game_over());
}
