//! Piece randomness.
//!
//! The engine never calls a clock or a global RNG directly; it draws kinds
//! through the [`MinoRng`] trait so tests and replays can inject a fixed
//! sequence. [`ClockRng`] is the default used by the playable binary: it
//! reduces a free-running microsecond counter modulo 7, which is uniform
//! enough for play and costs nothing. [`SimpleRng`] is a seedable LCG for
//! deterministic runs.

use std::time::Instant;

use oled_tetris_types::MinoKind;

/// Source of the next piece kind.
pub trait MinoRng {
    fn next_kind(&mut self) -> MinoKind;
}

/// Microsecond-clock randomness: the elapsed time since construction, reduced
/// modulo 7. Distribution quality depends on when the player presses keys,
/// which is fine for a game and useless for statistics.
pub struct ClockRng {
    epoch: Instant,
}

impl ClockRng {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for ClockRng {
    fn default() -> Self {
        Self::new()
    }
}

impl MinoRng for ClockRng {
    fn next_kind(&mut self) -> MinoKind {
        let micros = self.epoch.elapsed().as_micros() as u32;
        MinoKind::from_index(micros)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG.
/// Uses constants from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl MinoRng for SimpleRng {
    fn next_kind(&mut self) -> MinoKind {
        MinoKind::from_index(self.next_u32())
    }
}

/// Cycles through a fixed kind sequence. Test helper.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    kinds: Vec<MinoKind>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(kinds: Vec<MinoKind>) -> Self {
        assert!(!kinds.is_empty(), "sequence must not be empty");
        Self { kinds, cursor: 0 }
    }
}

impl MinoRng for SequenceRng {
    fn next_kind(&mut self) -> MinoKind {
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor += 1;
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_simple_rng_zero_seed_is_remapped() {
        let mut a = SimpleRng::new(0);
        let mut b = SimpleRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_sequence_rng_cycles() {
        let mut rng = SequenceRng::new(vec![MinoKind::I, MinoKind::O]);
        assert_eq!(rng.next_kind(), MinoKind::I);
        assert_eq!(rng.next_kind(), MinoKind::O);
        assert_eq!(rng.next_kind(), MinoKind::I);
    }

    #[test]
    fn test_clock_rng_yields_valid_kinds() {
        let mut rng = ClockRng::new();
        for _ in 0..20 {
            let kind = rng.next_kind();
            assert!(MinoKind::ALL.contains(&kind));
        }
    }
}
