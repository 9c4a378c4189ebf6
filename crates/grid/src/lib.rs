//! Packed 128x128 bit-grid.
//!
//! Each row is two 64-bit words: word 0 holds columns 0..=63 with column 0 in
//! the most significant bit, word 1 holds columns 64..=127. Row 0 is the top,
//! column 0 the left edge. The packing is a private representation detail;
//! nothing outside this crate indexes the words directly.
//!
//! All operations are total over their documented domain. Out-of-range
//! parameters (coordinates, shift magnitudes, extract rectangles, enlarge
//! factors) are silent no-ops rather than errors. Callers that need a cleared
//! destination before `extract`/`enlarge` must clear it themselves; both only
//! set bits, they never clear bits already present in the destination.

use std::fmt;

/// Grid edge length in cells.
pub const GRID_SIZE: usize = 128;

const WORDS_PER_ROW: usize = 2;

/// A 128x128 boolean matrix packed two words per row.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitGrid {
    rows: [[u64; WORDS_PER_ROW]; GRID_SIZE],
}

impl BitGrid {
    /// All-zero grid (const-friendly; used for embedded static patterns).
    pub const fn zeroed() -> Self {
        Self {
            rows: [[0; WORDS_PER_ROW]; GRID_SIZE],
        }
    }

    pub fn new() -> Self {
        Self::zeroed()
    }

    /// Const-friendly single-bit set, by value. Out-of-range coordinates are
    /// ignored. Runtime code should use [`BitGrid::write`] instead.
    pub const fn with_bit(mut self, row: usize, col: usize) -> Self {
        if row < GRID_SIZE && col < GRID_SIZE {
            self.rows[row][col / 64] |= 1u64 << (63 - (col % 64));
        }
        self
    }

    /// Read the bit at (row, col). Out-of-range coordinates read as false.
    #[inline]
    pub fn read(&self, row: usize, col: usize) -> bool {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return false;
        }
        (self.rows[row][col / 64] >> (63 - (col % 64))) & 1 != 0
    }

    /// Write the bit at (row, col). Out-of-range coordinates are a no-op.
    #[inline]
    pub fn write(&mut self, row: usize, col: usize, level: bool) {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return;
        }
        let mask = 1u64 << (63 - (col % 64));
        if level {
            self.rows[row][col / 64] |= mask;
        } else {
            self.rows[row][col / 64] &= !mask;
        }
    }

    pub fn clear(&mut self) {
        self.rows = [[0; WORDS_PER_ROW]; GRID_SIZE];
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row[0] == 0 && row[1] == 0)
    }

    pub fn count_ones(&self) -> u32 {
        self.rows
            .iter()
            .map(|row| row[0].count_ones() + row[1].count_ones())
            .sum()
    }

    /// Shift the whole grid. Positive `dx`/`dy` shift right/down, negative
    /// left/up. Magnitudes of 0 or >= 128 on an axis leave that axis
    /// untouched. Bits shifted out are discarded; bits shifted in are zero.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        if dx > 0 && dx < GRID_SIZE as i32 {
            self.shift_right(dx as usize);
        } else if dx < 0 && dx > -(GRID_SIZE as i32) {
            self.shift_left((-dx) as usize);
        }

        if dy > 0 && dy < GRID_SIZE as i32 {
            self.shift_down(dy as usize);
        } else if dy < 0 && dy > -(GRID_SIZE as i32) {
            self.shift_up((-dy) as usize);
        }
    }

    fn shift_right(&mut self, n: usize) {
        for row in &mut self.rows {
            let high = row[0];
            let low = row[1];
            if n < 64 {
                row[1] = (low >> n) | (high << (64 - n));
                row[0] = high >> n;
            } else {
                row[1] = high >> (n - 64);
                row[0] = 0;
            }
        }
    }

    fn shift_left(&mut self, n: usize) {
        for row in &mut self.rows {
            let high = row[0];
            let low = row[1];
            if n < 64 {
                row[0] = (high << n) | (low >> (64 - n));
                row[1] = low << n;
            } else {
                row[0] = low << (n - 64);
                row[1] = 0;
            }
        }
    }

    fn shift_down(&mut self, n: usize) {
        for row in (n..GRID_SIZE).rev() {
            self.rows[row] = self.rows[row - n];
        }
        for row in 0..n {
            self.rows[row] = [0; WORDS_PER_ROW];
        }
    }

    fn shift_up(&mut self, n: usize) {
        for row in 0..GRID_SIZE - n {
            self.rows[row] = self.rows[row + n];
        }
        for row in GRID_SIZE - n..GRID_SIZE {
            self.rows[row] = [0; WORDS_PER_ROW];
        }
    }

    pub fn or(&mut self, operand: &BitGrid) {
        for (dst, src) in self.rows.iter_mut().zip(operand.rows.iter()) {
            dst[0] |= src[0];
            dst[1] |= src[1];
        }
    }

    pub fn and(&mut self, operand: &BitGrid) {
        for (dst, src) in self.rows.iter_mut().zip(operand.rows.iter()) {
            dst[0] &= src[0];
            dst[1] &= src[1];
        }
    }

    pub fn xor(&mut self, operand: &BitGrid) {
        for (dst, src) in self.rows.iter_mut().zip(operand.rows.iter()) {
            dst[0] ^= src[0];
            dst[1] ^= src[1];
        }
    }

    /// Difference: clear every bit that is set in the operand.
    pub fn and_not(&mut self, operand: &BitGrid) {
        for (dst, src) in self.rows.iter_mut().zip(operand.rows.iter()) {
            dst[0] &= !src[0];
            dst[1] &= !src[1];
        }
    }

    /// OR a shifted copy of the operand into this grid; the operand itself is
    /// left untouched.
    pub fn or_shifted(&mut self, operand: &BitGrid, dx: i32, dy: i32) {
        let mut shifted = operand.clone();
        shifted.shift(dx, dy);
        self.or(&shifted);
    }

    /// True iff any bit position is set in both grids. This is the sole
    /// collision predicate the engine uses.
    pub fn overlaps(&self, other: &BitGrid) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .any(|(a, b)| (a[0] & b[0]) != 0 || (a[1] & b[1]) != 0)
    }

    pub fn copy_from(&mut self, src: &BitGrid) {
        self.rows = src.rows;
    }

    /// Copy one whole row over another (used by row collapse). Out-of-range
    /// indices are a no-op.
    pub fn copy_row(&mut self, dst_row: usize, src_row: usize) {
        if dst_row >= GRID_SIZE || src_row >= GRID_SIZE {
            return;
        }
        self.rows[dst_row] = self.rows[src_row];
    }

    /// OR the rectangle [col0..=col1] x [row0..=row1] of `src` into this grid,
    /// anchored at (0, 0).
    ///
    /// If col0 > col1, row0 > row1, or either end bound is >= 128, the call is
    /// a no-op and the destination is left exactly as-is. This silent-clip
    /// contract is relied upon by callers.
    pub fn extract(
        &mut self,
        src: &BitGrid,
        col0: usize,
        col1: usize,
        row0: usize,
        row1: usize,
    ) {
        if col0 > col1 || row0 > row1 || col1 >= GRID_SIZE || row1 >= GRID_SIZE {
            return;
        }
        for row in 0..=(row1 - row0) {
            for col in 0..=(col1 - col0) {
                if src.read(row0 + row, col0 + col) {
                    self.write(row, col, true);
                }
            }
        }
    }

    /// For each set source bit at (r, c), OR the factor x factor block at
    /// (r * factor, c * factor) into this grid. Destination bits that would
    /// fall outside the grid are silently dropped. Factors of 0 or > 128 are
    /// a no-op.
    pub fn enlarge(&mut self, src: &BitGrid, factor: usize) {
        if factor == 0 || factor > GRID_SIZE {
            return;
        }
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if !src.read(row, col) {
                    continue;
                }
                let base_row = row * factor;
                let base_col = col * factor;
                if base_row >= GRID_SIZE || base_col >= GRID_SIZE {
                    continue;
                }
                for dr in 0..factor {
                    for dc in 0..factor {
                        self.write(base_row + dr, base_col + dc, true);
                    }
                }
            }
        }
    }

    /// Draw a horizontal run of set bits. A length of 0 or > 128, a start
    /// outside the grid, or a run that would leave the grid is a no-op.
    pub fn horizontal_line(&mut self, start_col: usize, start_row: usize, length: usize) {
        if length == 0
            || length > GRID_SIZE
            || start_col >= GRID_SIZE
            || start_row >= GRID_SIZE
            || start_col > GRID_SIZE - length
        {
            return;
        }
        for c in 0..length {
            self.write(start_row, start_col + c, true);
        }
    }

    /// Draw a vertical run of set bits; same no-op contract as
    /// [`BitGrid::horizontal_line`].
    pub fn vertical_line(&mut self, start_col: usize, start_row: usize, length: usize) {
        if length == 0
            || length > GRID_SIZE
            || start_col >= GRID_SIZE
            || start_row >= GRID_SIZE
            || start_row > GRID_SIZE - length
        {
            return;
        }
        for r in 0..length {
            self.write(start_row + r, start_col, true);
        }
    }

    /// Fill a solid rectangle; no-op if either extent fails the line contract.
    pub fn fill_rect(&mut self, start_col: usize, start_row: usize, width: usize, height: usize) {
        if width == 0
            || width > GRID_SIZE
            || height == 0
            || height > GRID_SIZE
            || start_col >= GRID_SIZE
            || start_row >= GRID_SIZE
            || start_col > GRID_SIZE - width
            || start_row > GRID_SIZE - height
        {
            return;
        }
        for r in 0..height {
            for c in 0..width {
                self.write(start_row + r, start_col + c, true);
            }
        }
    }
}

impl Default for BitGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 128x128 dumps are unreadable in assertion output; show population
        // and the bounding box of set bits instead.
        let mut min_row = GRID_SIZE;
        let mut max_row = 0;
        let mut min_col = GRID_SIZE;
        let mut max_col = 0;
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if self.read(row, col) {
                    min_row = min_row.min(row);
                    max_row = max_row.max(row);
                    min_col = min_col.min(col);
                    max_col = max_col.max(col);
                }
            }
        }
        if min_row > max_row {
            write!(f, "BitGrid {{ empty }}")
        } else {
            write!(
                f,
                "BitGrid {{ ones: {}, rows: {}..={}, cols: {}..={} }}",
                self.count_ones(),
                min_row,
                max_row,
                min_col,
                max_col
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_roundtrip() {
        let mut g = BitGrid::new();
        g.write(3, 70, true);
        assert!(g.read(3, 70));
        g.write(3, 70, false);
        assert!(!g.read(3, 70));
    }

    #[test]
    fn test_word_boundary_columns() {
        let mut g = BitGrid::new();
        for col in [0, 63, 64, 127] {
            g.write(10, col, true);
        }
        assert_eq!(g.count_ones(), 4);
        g.shift(1, 0);
        assert!(g.read(10, 1));
        assert!(g.read(10, 64));
        assert!(g.read(10, 65));
        assert!(!g.read(10, 0));
        // Column 127 was shifted out.
        assert_eq!(g.count_ones(), 3);
    }

    #[test]
    fn test_shift_left_right_mirror() {
        let mut g = BitGrid::new();
        g.write(5, 80, true);
        g.shift(-70, 0);
        assert!(g.read(5, 10));
        g.shift(70, 0);
        assert!(g.read(5, 80));
        assert_eq!(g.count_ones(), 1);
    }

    #[test]
    fn test_shift_out_of_range_magnitude_is_noop() {
        let mut g = BitGrid::new();
        g.write(64, 64, true);
        let before = g.clone();
        g.shift(128, 0);
        g.shift(-128, 0);
        g.shift(0, 128);
        g.shift(0, -200);
        g.shift(0, 0);
        assert_eq!(g, before);
    }

    #[test]
    fn test_shift_down_fills_with_zero() {
        let mut g = BitGrid::new();
        g.write(0, 0, true);
        g.write(127, 127, true);
        g.shift(0, 2);
        assert!(g.read(2, 0));
        assert!(!g.read(0, 0));
        // The bottom bit fell off the grid.
        assert_eq!(g.count_ones(), 1);
    }

    #[test]
    fn test_boolean_ops() {
        let mut a = BitGrid::new();
        let mut b = BitGrid::new();
        a.write(1, 1, true);
        a.write(2, 2, true);
        b.write(2, 2, true);
        b.write(3, 3, true);

        let mut or = a.clone();
        or.or(&b);
        assert_eq!(or.count_ones(), 3);

        let mut and = a.clone();
        and.and(&b);
        assert_eq!(and.count_ones(), 1);
        assert!(and.read(2, 2));

        let mut xor = a.clone();
        xor.xor(&b);
        assert_eq!(xor.count_ones(), 2);
        assert!(!xor.read(2, 2));

        let mut diff = a.clone();
        diff.and_not(&b);
        assert_eq!(diff.count_ones(), 1);
        assert!(diff.read(1, 1));
    }

    #[test]
    fn test_overlaps() {
        let mut a = BitGrid::new();
        let mut b = BitGrid::new();
        a.write(100, 100, true);
        assert!(!a.overlaps(&b));
        b.write(100, 100, true);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_extract_anchors_at_origin() {
        let mut src = BitGrid::new();
        src.write(10, 20, true);
        src.write(12, 22, true);
        let mut dst = BitGrid::new();
        dst.extract(&src, 20, 23, 10, 13);
        assert!(dst.read(0, 0));
        assert!(dst.read(2, 2));
        assert_eq!(dst.count_ones(), 2);
    }

    #[test]
    fn test_extract_invalid_rectangle_leaves_dst_untouched() {
        let src = BitGrid::new();
        let mut dst = BitGrid::new();
        dst.write(5, 5, true);
        let before = dst.clone();
        dst.extract(&src, 10, 5, 0, 3); // col0 > col1
        dst.extract(&src, 0, 3, 10, 5); // row0 > row1
        dst.extract(&src, 0, 128, 0, 3); // col1 out of range
        dst.extract(&src, 0, 3, 0, 200); // row1 out of range
        assert_eq!(dst, before);
    }

    #[test]
    fn test_extract_only_sets_bits() {
        let mut src = BitGrid::new();
        src.write(0, 0, true);
        let mut dst = BitGrid::new();
        dst.write(1, 1, true);
        dst.extract(&src, 0, 3, 0, 3);
        // The pre-existing destination bit survives even though the source
        // rectangle is clear at (1, 1).
        assert!(dst.read(1, 1));
        assert!(dst.read(0, 0));
    }

    #[test]
    fn test_enlarge_scales_blocks() {
        let mut src = BitGrid::new();
        src.write(1, 2, true);
        let mut dst = BitGrid::new();
        dst.enlarge(&src, 3);
        for r in 3..6 {
            for c in 6..9 {
                assert!(dst.read(r, c), "({}, {}) should be set", r, c);
            }
        }
        assert_eq!(dst.count_ones(), 9);
    }

    #[test]
    fn test_enlarge_clips_out_of_range_blocks() {
        let mut src = BitGrid::new();
        src.write(100, 0, true);
        let mut dst = BitGrid::new();
        dst.enlarge(&src, 2); // base row 200 is outside the grid
        assert!(dst.is_empty());

        src.clear();
        src.write(63, 63, true);
        dst.enlarge(&src, 2); // block at (126, 126) fits entirely
        assert_eq!(dst.count_ones(), 4);
    }

    #[test]
    fn test_enlarge_invalid_factor_is_noop() {
        let mut src = BitGrid::new();
        src.write(0, 0, true);
        let mut dst = BitGrid::new();
        dst.enlarge(&src, 0);
        dst.enlarge(&src, 129);
        assert!(dst.is_empty());
    }

    #[test]
    fn test_line_and_rect_helpers() {
        let mut g = BitGrid::new();
        g.horizontal_line(2, 0, 5);
        assert_eq!(g.count_ones(), 5);
        g.vertical_line(0, 2, 4);
        assert_eq!(g.count_ones(), 9);
        g.fill_rect(10, 10, 3, 2);
        assert_eq!(g.count_ones(), 15);

        // Runs that would leave the grid are no-ops.
        let before = g.clone();
        g.horizontal_line(125, 0, 10);
        g.vertical_line(0, 125, 10);
        g.fill_rect(120, 120, 16, 2);
        g.horizontal_line(0, 0, 0);
        assert_eq!(g, before);
    }

    #[test]
    fn test_copy_row() {
        let mut g = BitGrid::new();
        g.write(7, 3, true);
        g.write(7, 100, true);
        g.copy_row(9, 7);
        assert!(g.read(9, 3));
        assert!(g.read(9, 100));
        assert!(g.read(7, 3));
    }

    #[test]
    fn test_or_shifted_leaves_operand_untouched() {
        let mut operand = BitGrid::new();
        operand.write(0, 0, true);
        let reference = operand.clone();
        let mut dst = BitGrid::new();
        dst.or_shifted(&operand, 4, 5);
        assert!(dst.read(5, 4));
        assert_eq!(operand, reference);
    }
}
