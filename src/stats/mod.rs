//! Numeric primitives backing the analysis functions.

pub mod special;

/// Single-pass accumulator for mean and sample variance (Welford's
/// online algorithm), numerically stable where the naive
/// `E[X²] − (E[X])²` formula is not.
#[derive(Debug, Clone, Default)]
pub struct Welford {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        // Uses the updated mean: m2 accumulates Σ (x − μₙ)(x − μₙ₋₁).
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean, or `None` before the first sample.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.mean)
        }
    }

    /// Sample variance (n − 1 denominator), or `None` with fewer than
    /// two samples.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2 / (self.count - 1) as f64)
        }
    }

    pub fn sample_std(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}
