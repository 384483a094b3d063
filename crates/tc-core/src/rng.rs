//! Deterministic generator for per-segment incident rolls.
//!
//! # Determinism strategy
//!
//! The incident check in the segment speed model must give the same answer
//! for the same `(offset_minutes, distance_m)` pair on every run, every
//! machine and every build.  A general-purpose RNG (`thread_rng`,
//! `SmallRng`) is explicitly *not* portable across `rand` releases or
//! targets, so the roll comes from a SplitMix64 stream seeded by
//!
//!   seed = offset_minutes * MIXING_CONSTANT  XOR  distance_m.to_bits()
//!
//! SplitMix64 is fully specified by a handful of integer operations, so the
//! same seed yields the same sequence in any language.
//!
//! The type implements [`rand::RngCore`] and [`rand::SeedableRng`], so it can
//! also drive `rand` distributions when a caller wants one.

use rand::{RngCore, SeedableRng};

/// 64-bit fractional golden-ratio constant (the SplitMix64 increment).
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 pseudo-random generator.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator for the incident roll of one segment at one departure
    /// offset.
    pub fn for_segment(offset_minutes: i64, distance_m: f64) -> Self {
        let seed = (offset_minutes as u64).wrapping_mul(MIXING_CONSTANT) ^ distance_m.to_bits();
        Self::new(seed)
    }

    /// Uniform value in `[0, 1)` built from the top 53 bits of the next
    /// output.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

impl RngCore for SplitMix64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(MIXING_CONSTANT);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SplitMix64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    /// Use the state directly; the default implementation would expand the
    /// seed through PCG32 first.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
