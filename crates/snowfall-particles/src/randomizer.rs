//! Per-flake random sampler

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bounded uniform draws, a signed coin flip and a clamped Gaussian.
///
/// Every snowflake owns one, so no generator state is shared between flakes.
pub struct Randomizer {
    rng: StdRng,
}

impl Randomizer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a seed for a child sampler
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Returns `U[0,1) * (max + 1)`.
    ///
    /// The result can exceed `max` (up to `max + 1`, exclusive). Horizontal
    /// placement and deflection angles rely on that spread.
    pub fn uniform_double(&mut self, max: i32) -> f64 {
        self.rng.gen::<f64>() * (f64::from(max) + 1.0)
    }

    /// Returns an integer in `[min, max]`.
    ///
    /// With `gaussian` set, the offset from `min` is scaled from the magnitude
    /// of [`clamped_gaussian`](Self::clamped_gaussian), so small values are
    /// common and large ones form a long tail.
    pub fn uniform_int(&mut self, min: i32, max: i32, gaussian: bool) -> i32 {
        let span = i64::from(max) - i64::from(min);
        if span <= 0 {
            return min;
        }
        let offset = if gaussian {
            (self.clamped_gaussian().abs() * (span as f64 + 1.0)) as i64
        } else {
            self.rng.gen_range(0..=span)
        };
        (i64::from(min) + offset.min(span)) as i32
    }

    /// Standard normal divided by 3, redrawn until it lies strictly in (-1, 1).
    pub fn clamped_gaussian(&mut self) -> f64 {
        loop {
            let gaussian = self.standard_normal() / 3.0;
            if gaussian > -1.0 && gaussian < 1.0 {
                return gaussian;
            }
        }
    }

    /// +1 or -1 with equal probability
    pub fn signum(&mut self) -> i32 {
        if self.rng.gen::<bool>() {
            1
        } else {
            -1
        }
    }

    // Box-Muller transform; `u1` is kept in (0, 1] so the log is finite
    fn standard_normal(&mut self) -> f64 {
        let u1 = 1.0 - self.rng.gen::<f64>();
        let u2 = self.rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}
