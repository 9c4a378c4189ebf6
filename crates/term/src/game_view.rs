//! GameView: maps a per-tick render snapshot into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. The snapshot already carries the
//! field and piece as bitmaps in the same coordinate space; drawing is mostly
//! deciding which of the overlapping layers wins each cell.

use oled_tetris_core::{catalog, RenderSnapshot};
use oled_tetris_grid::BitGrid;
use oled_tetris_types::{
    GameState, Rotation, FIELD_COL_LEFT_WALL, FIELD_COL_RIGHT_WALL, FIELD_ROW_FLOOR, MINO_CELL,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const FIELD_CELL_COLS: u16 = (FIELD_COL_RIGHT_WALL + 1) as u16;
const FIELD_CELL_ROWS: u16 = (FIELD_ROW_FLOOR + 1) as u16;

pub struct GameView {
    /// Field cell width in terminal columns; 2x1 compensates for the typical
    /// terminal glyph aspect ratio.
    cell_w: u16,
    cell_h: u16,
    frame_style: CellStyle,
    stack_style: CellStyle,
    piece_style: CellStyle,
    ghost_style: CellStyle,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            cell_h: 1,
            frame_style: CellStyle::plain(Rgb::new(130, 130, 140)),
            stack_style: CellStyle::plain(Rgb::new(240, 180, 40)),
            piece_style: CellStyle::plain(Rgb::new(250, 250, 250)).bold(),
            ghost_style: CellStyle::plain(Rgb::new(140, 120, 60)).dim(),
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a snapshot into a fresh framebuffer sized to the viewport.
    pub fn render(&self, snapshot: &RenderSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let field_w = FIELD_CELL_COLS * self.cell_w;
        let field_h = FIELD_CELL_ROWS * self.cell_h;
        // Leave room for the side panel when centering.
        let start_x = viewport.width.saturating_sub(field_w + PANEL_WIDTH) / 2;
        let start_y = viewport.height.saturating_sub(field_h) / 2;

        let piece_visible = matches!(snapshot.state, GameState::Running | GameState::Paused);
        let ghost = piece_visible.then(|| self.ghost_layer(snapshot));

        for row in 0..FIELD_CELL_ROWS {
            for col in 0..FIELD_CELL_COLS {
                let (r, c) = (usize::from(row), usize::from(col));
                let (ch, style) = if piece_visible && snapshot.piece.read(r, c) {
                    ('█', self.piece_style)
                } else if ghost.as_ref().is_some_and(|g| g.read(r, c)) {
                    ('░', self.ghost_style)
                } else if snapshot.field.read(r, c) {
                    ('█', self.field_cell_style(r, c))
                } else {
                    ('·', self.ghost_style)
                };
                self.fill_cell(&mut fb, start_x, start_y, col, row, ch, style);
            }
        }

        self.draw_panel(&mut fb, snapshot, start_x + field_w + 2, start_y);
        self.draw_state_line(&mut fb, snapshot.state, start_x, start_y, field_w, field_h);
        fb
    }

    /// Piece shifted to its predicted resting place, minus the piece itself
    /// so an already-resting piece casts no ghost.
    fn ghost_layer(&self, snapshot: &RenderSnapshot) -> BitGrid {
        let mut layer = BitGrid::new();
        layer.or_shifted(&snapshot.piece, 0, i32::from(snapshot.landing_distance));
        layer.and_not(&snapshot.piece);
        layer
    }

    fn field_cell_style(&self, row: usize, col: usize) -> CellStyle {
        let is_box =
            col == FIELD_COL_LEFT_WALL || col == FIELD_COL_RIGHT_WALL || row == FIELD_ROW_FLOOR;
        if is_box {
            self.frame_style
        } else {
            self.stack_style
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        fb.fill_rect(
            start_x + cell_x * self.cell_w,
            start_y + cell_y * self.cell_h,
            self.cell_w,
            self.cell_h,
            ch,
            style,
        );
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snapshot: &RenderSnapshot, x: u16, y: u16) {
        let label = CellStyle::default().bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200));

        fb.put_str(x, y, "SCORE", label);
        fb.put_str(x, y + 1, &snapshot.params.score.to_string(), value);
        fb.put_str(x, y + 3, "LEVEL", label);
        fb.put_str(x, y + 4, &snapshot.params.level.to_string(), value);
        fb.put_str(x, y + 6, "LINES", label);
        fb.put_str(x, y + 7, &snapshot.params.lines.to_string(), value);

        fb.put_str(x, y + 9, "NEXT", label);
        let shape = catalog::shape_bitmap(snapshot.next_kind, Rotation::R0);
        for row in 0..MINO_CELL {
            for col in 0..MINO_CELL {
                if shape.read(row, col) {
                    let px = x + (col as u16) * self.cell_w;
                    let py = y + 10 + row as u16;
                    fb.fill_rect(px, py, self.cell_w, 1, '█', self.stack_style);
                }
            }
        }
    }

    fn draw_state_line(
        &self,
        fb: &mut FrameBuffer,
        state: GameState,
        start_x: u16,
        start_y: u16,
        field_w: u16,
        field_h: u16,
    ) {
        let text = match state {
            GameState::WaitingStart => "PRESS ENTER",
            GameState::Paused => "PAUSED",
            GameState::GameOver => "GAME OVER",
            GameState::Initializing | GameState::Running => return,
        };
        let style = CellStyle::plain(Rgb::new(255, 255, 255)).bold();
        let x = start_x + field_w.saturating_sub(text.len() as u16) / 2;
        fb.put_str(x, start_y + field_h / 2, text, style);
    }
}

const PANEL_WIDTH: u16 = 14;

#[cfg(test)]
mod tests {
    use super::*;
    use oled_tetris_core::{Engine, RenderSnapshot, SimpleRng};
    use oled_tetris_types::InputSnapshot;

    fn find_str(fb: &FrameBuffer, needle: &str) -> bool {
        for y in 0..fb.height() {
            let row: String = (0..fb.width())
                .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
                .collect();
            if row.contains(needle) {
                return true;
            }
        }
        false
    }

    fn count_char(fb: &FrameBuffer, needle: char) -> usize {
        let mut count = 0;
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get(x, y).map(|c| c.ch) == Some(needle) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_waiting_start_shows_prompt_and_no_piece() {
        let view = GameView::default();
        let mut engine = Engine::new(Box::new(SimpleRng::new(1)));
        let mut snapshot = RenderSnapshot::default();
        engine.snapshot_into(&mut snapshot);

        let fb = view.render(&snapshot, Viewport::new(80, 30));
        assert!(find_str(&fb, "PRESS ENTER"));
        assert!(find_str(&fb, "SCORE"));
    }

    #[test]
    fn test_running_renders_field_box_and_piece() {
        let view = GameView::default();
        let mut engine = Engine::new(Box::new(SimpleRng::new(1)));
        engine.tick(&InputSnapshot {
            confirm_1: true,
            ..InputSnapshot::IDLE
        });
        engine.tick(&InputSnapshot::IDLE);
        engine.tick(&InputSnapshot::IDLE);
        let mut snapshot = RenderSnapshot::default();
        engine.snapshot_into(&mut snapshot);

        let fb = view.render(&snapshot, Viewport::new(80, 30));
        // Box, piece and next preview all draw solid blocks.
        assert!(count_char(&fb, '█') > 0);
        // A freshly spawned piece floats, so it casts a ghost.
        assert!(count_char(&fb, '░') > 0);
        assert!(!find_str(&fb, "PRESS ENTER"));
    }

    #[test]
    fn test_game_over_overlay() {
        let view = GameView::default();
        let mut snapshot = RenderSnapshot::default();
        snapshot.state = GameState::GameOver;
        let fb = view.render(&snapshot, Viewport::new(80, 30));
        assert!(find_str(&fb, "GAME OVER"));
    }

    #[test]
    fn test_render_fits_small_viewport_without_panicking() {
        let view = GameView::default();
        let snapshot = RenderSnapshot::default();
        let fb = view.render(&snapshot, Viewport::new(10, 5));
        assert_eq!(fb.width(), 10);
        assert_eq!(fb.height(), 5);
    }
}
