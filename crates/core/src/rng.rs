//! RNG module - seeded random selection for piece spawning
//!
//! Shapes and colors are drawn uniformly and independently. The generator is a
//! 32-bit linear congruential generator, so a seed replays the exact same
//! sequence of pieces and engine tests stay deterministic.

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;

/// Seeded LCG over the full 32-bit state space
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed the generator. Seed 0 is remapped to 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// Advance the state and return it
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Uniform index in `0..len`.
    ///
    /// Scales the full 32-bit output instead of taking a modulus: the low bits
    /// of an LCG cycle with a short period.
    pub fn next_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "next_index on an empty range");
        ((self.next_u32() as u64 * len as u64) >> 32) as usize
    }

    /// Pick one element uniformly.
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.next_index(items.len())]
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
