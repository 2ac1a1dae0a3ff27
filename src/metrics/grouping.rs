use std::collections::BTreeMap;

use serde::Serialize;

use super::types::WaveResult;

/// Rollup of every wave run at one concurrency level. The level average
/// is the mean of the wave averages, not weighted by request count.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelBreakdown {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub error_rate: f64,
    pub avg_response_time_ms: f64,
    pub total_duration_ms: u64,
}

#[derive(Debug, Default)]
struct LevelTotals {
    total_requests: u64,
    successful_requests: u64,
    failed_requests: u64,
    total_duration_ms: u64,
    avg_sum_ms: f64,
    wave_count: u64,
}

/// Groups wave results by concurrency level, keyed ascending.
#[must_use]
pub fn group_by_concurrency(waves: &[WaveResult]) -> BTreeMap<usize, LevelBreakdown> {
    let mut levels: BTreeMap<usize, LevelTotals> = BTreeMap::new();

    for wave in waves {
        let totals = levels.entry(wave.concurrency).or_default();
        totals.total_requests = totals.total_requests.saturating_add(wave.total_requests);
        totals.successful_requests = totals
            .successful_requests
            .saturating_add(wave.successful_requests);
        totals.failed_requests = totals.failed_requests.saturating_add(wave.failed_requests);
        totals.total_duration_ms = totals.total_duration_ms.saturating_add(wave.duration_ms);
        totals.avg_sum_ms += wave.avg_response_time_ms;
        totals.wave_count = totals.wave_count.saturating_add(1);
    }

    levels
        .into_iter()
        .map(|(concurrency, totals)| {
            let error_rate = if totals.total_requests > 0 {
                totals.failed_requests as f64 / totals.total_requests as f64
            } else {
                0.0
            };
            let avg_response_time_ms = if totals.wave_count > 0 {
                totals.avg_sum_ms / totals.wave_count as f64
            } else {
                0.0
            };
            (
                concurrency,
                LevelBreakdown {
                    total_requests: totals.total_requests,
                    successful_requests: totals.successful_requests,
                    failed_requests: totals.failed_requests,
                    error_rate,
                    avg_response_time_ms,
                    total_duration_ms: totals.total_duration_ms,
                },
            )
        })
        .collect()
}
