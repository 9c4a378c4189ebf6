//! Score, line and level bookkeeping.

use oled_tetris_types::{GameParams, MAX_ERASE_ROWS, MAX_LEVEL, NEXT_LEVEL_LINES, ROW_SCORE_RATE};

/// Fold one lock's erased-row count into the game parameters.
///
/// Scoring is `rate[n] * n * (9 + level)` with the level sampled before any
/// level-up, so the rows that trigger a promotion still score at the old
/// level. The level advances at most one step per lock, once the cumulative
/// line count exceeds the current level's threshold, and stops at 9.
pub fn update(params: &mut GameParams, erased_rows: usize) {
    let n = erased_rows.min(MAX_ERASE_ROWS);
    if n == 0 {
        params.updated = false;
        return;
    }

    let points = ROW_SCORE_RATE[n] * n as u32 * (9 + u32::from(params.level));
    params.score = params.score.saturating_add(points);
    params.lines = params.lines.saturating_add(n as u32);

    if params.level < MAX_LEVEL && params.lines > NEXT_LEVEL_LINES[usize::from(params.level)] {
        params.level += 1;
    }
    params.updated = true;
}
