//! Seedable random source for bonus sessions
//!
//! Every random draw made by a bonus (hold values, prize bands, modifier
//! placement, shuffles, multiplier draws, wheel angle) goes through one
//! [`WeightedPicker`], so a fixed seed reproduces a whole session.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// One value band of the prize split, as fractions of the maximum prize
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBand {
    /// Share of cells/segments drawn from this band
    pub share: f64,
    /// Lower bound as a fraction of the maximum
    pub low: f64,
    /// Upper bound as a fraction of the maximum
    pub high: f64,
}

/// Bottom 50% / next 30% / top 20% split used by Pick & Click and the Wheel
pub const PRIZE_BANDS: [ValueBand; 3] = [
    ValueBand { share: 0.5, low: 0.0, high: 0.3 },
    ValueBand { share: 0.3, low: 0.3, high: 0.7 },
    ValueBand { share: 0.2, low: 0.7, high: 1.0 },
];

/// How many of `total` items land in each band. The top band takes the rounding remainder.
pub fn band_counts(total: usize) -> [usize; 3] {
    let bottom = (total as f64 * PRIZE_BANDS[0].share).floor() as usize;
    let middle = (total as f64 * PRIZE_BANDS[1].share).floor() as usize;
    [bottom, middle, total - bottom - middle]
}

/// Random source for bonus mini-games
#[derive(Debug, Clone)]
pub struct WeightedPicker {
    rng: ChaCha8Rng,
}

impl WeightedPicker {
    /// Create a picker with optional seed (OS entropy when `None`)
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Reseed in place
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Uniform integer in `[low, high]` (bounds swapped if inverted)
    pub fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.rng.random_range(low..=high)
    }

    /// Uniform value in `[low, high]` (bounds swapped if inverted)
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        if low == high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    /// Uniform choice from a slice
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.rng).copied()
    }

    /// Uniform index into a collection of `len` items
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Index drawn proportionally to `weights`. Non-positive weights are never chosen.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let mut roll = self.rng.random_range(0.0..total);
        for (i, &w) in weights.iter().enumerate() {
            if w <= 0.0 {
                continue;
            }
            if roll < w {
                return Some(i);
            }
            roll -= w;
        }
        weights.iter().rposition(|w| *w > 0.0)
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Rotation angle in `[0, 360)` degrees
    pub fn angle(&mut self) -> f64 {
        self.rng.random_range(0.0..360.0)
    }

    /// Draw `total` values split across [`PRIZE_BANDS`] of `max_value`.
    ///
    /// Values are continuous and stay inside their band. The bottom band
    /// starts at 1 unless the band itself tops out below that. Values are
    /// returned bottom band first; callers shuffle before placement.
    pub fn banded_values(&mut self, total: usize, max_value: f64) -> Vec<f64> {
        let max_value = max_value.max(0.0);
        let counts = band_counts(total);
        let mut values = Vec::with_capacity(total);

        for (i, (band, &count)) in PRIZE_BANDS.iter().zip(counts.iter()).enumerate() {
            let high = band.high * max_value;
            let low = if i == 0 { high.min(1.0) } else { band.low * max_value };
            for _ in 0..count {
                values.push(self.uniform(low, high).min(max_value));
            }
        }

        values
    }
}

impl Default for WeightedPicker {
    fn default() -> Self {
        Self::new(None)
    }
}
