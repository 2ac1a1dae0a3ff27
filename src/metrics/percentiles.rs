//! Percentile math over sorted latency samples.

use serde::Serialize;

/// Linear-interpolation percentile over ascending-sorted samples.
///
/// The rank is `(len - 1) * p / 100`; fractional ranks interpolate
/// between the two neighbouring samples. Empty input yields 0.
#[must_use]
pub fn percentile(sorted: &[u64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = sorted.len().saturating_sub(1) as f64 * p / 100.0;
    let base = rank.floor() as usize;
    let rest = rank - rank.floor();
    let lower = sorted.get(base).copied().unwrap_or(0) as f64;
    sorted
        .get(base.saturating_add(1))
        .map_or(lower, |&next| lower + rest * (next as f64 - lower))
}

/// Latency distribution for one sample set, percentiles included.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResponseTimeStats {
    pub min_ms: u64,
    pub max_ms: u64,
    pub avg_ms: f64,
    pub p50_ms: f64,
    pub p90_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

impl ResponseTimeStats {
    /// Sorts a copy of the samples and derives the distribution.
    /// All fields are 0 for an empty set.
    #[must_use]
    pub fn from_samples(samples: &[u64]) -> Self {
        if samples.is_empty() {
            return Self {
                min_ms: 0,
                max_ms: 0,
                avg_ms: 0.0,
                p50_ms: 0.0,
                p90_ms: 0.0,
                p95_ms: 0.0,
                p99_ms: 0.0,
            };
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let sum_ms = sorted.iter().copied().fold(0_u64, u64::saturating_add);
        Self {
            min_ms: sorted.first().copied().unwrap_or(0),
            max_ms: sorted.last().copied().unwrap_or(0),
            avg_ms: sum_ms as f64 / sorted.len() as f64,
            p50_ms: percentile(&sorted, 50.0),
            p90_ms: percentile(&sorted, 90.0),
            p95_ms: percentile(&sorted, 95.0),
            p99_ms: percentile(&sorted, 99.0),
        }
    }
}
