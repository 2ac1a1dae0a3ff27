use std::time::Instant;

use futures_util::future::join_all;
use reqwest::Client;
use tracing::info;

use crate::http::execute_request;
use crate::metrics::{CampaignMetrics, EndpointMetrics, RequestOutcome, WaveResult};

/// Fixed inputs for one wave.
pub struct WaveContext<'ctx> {
    pub client: &'ctx Client,
    pub url: &'ctx str,
    pub endpoint: Option<&'ctx str>,
    pub concurrency: usize,
    pub wave_number: usize,
    pub total_waves: usize,
}

/// Runs one wave: fans out `concurrency` GETs at once, waits for every one
/// to settle, derives the [`WaveResult`] and ingests it into the supplied
/// accumulators. Ingestion happens only after the whole wave has joined.
pub async fn run_wave(
    context: &WaveContext<'_>,
    campaign: &mut CampaignMetrics,
    endpoint_metrics: Option<&mut EndpointMetrics>,
) -> WaveResult {
    info!(
        "Starting wave {} of {} with {} concurrent users",
        context.wave_number, context.total_waves, context.concurrency
    );

    let start = Instant::now();
    let requests = (0..context.concurrency).map(|user| {
        let id = format!(
            "{}users-wave{}-user{}",
            context.concurrency, context.wave_number, user
        );
        execute_request(context.client, id, context.url)
    });
    let outcomes: Vec<RequestOutcome> = join_all(requests).await;
    let duration_ms = start.elapsed().as_millis().min(u128::from(u64::MAX)) as u64;

    let wave = WaveResult::from_outcomes(
        context.endpoint.map(str::to_owned),
        context.concurrency,
        context.wave_number,
        outcomes,
        duration_ms,
    );

    campaign.record_wave(&wave);
    if let Some(metrics) = endpoint_metrics {
        metrics.record_wave(&wave);
    }

    info!(
        "Wave {} with {} users completed in {}ms ({}/{} ok, avg {:.2}ms)",
        wave.wave_number,
        wave.concurrency,
        wave.duration_ms,
        wave.successful_requests,
        wave.total_requests,
        wave.avg_response_time_ms
    );

    wave
}
