//! Injectable random sources for procedural generation.

use std::f64::consts::TAU;

/// Uniform random source consumed by the generators.
///
/// Implementors only provide `next_f64`; derived draws are built on top so
/// every source produces the same stream shape for the same underlying values.
pub trait RandomSource {
    /// Next value uniformly distributed in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[min, max)`.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform angle in `[0, 2π)`.
    fn angle(&mut self) -> f64 {
        self.next_f64() * TAU
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Simple deterministic RNG using hash function
#[derive(Clone, Debug)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    /// Advance state and return next u32
    pub fn next_u32(&mut self) -> u32 {
        // PCG-like state update
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        // Output function
        let mut h = (self.state >> 32) as u32;
        h = h.wrapping_mul(0x45d9f3b);
        h ^= h >> 16;
        h = h.wrapping_mul(0x45d9f3b);
        h ^= h >> 16;
        h
    }
}

impl RandomSource for SimpleRng {
    fn next_f64(&mut self) -> f64 {
        // Divide by 2^32 so 1.0 is never produced
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Useful for pinning individual draws in tests and tools.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// Returns `None` for an empty sequence.
    pub fn new(values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self { values, cursor: 0 })
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
