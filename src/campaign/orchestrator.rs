use reqwest::Client;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::metrics::{CampaignMetrics, EndpointMetrics};
use crate::shutdown::ShutdownSender;

use super::plan::{CampaignPlan, CampaignTarget};
use super::wave::{WaveContext, run_wave};

/// Final state of a campaign run: the accumulators plus the reason the
/// run stopped early, if it did.
#[derive(Debug)]
pub struct CampaignCompletion {
    pub metrics: CampaignMetrics,
    pub endpoints: Vec<EndpointMetrics>,
    pub interruption: Option<String>,
}

impl CampaignCompletion {
    /// True when every wave of the itinerary was recorded.
    #[must_use]
    pub fn completed_successfully(&self, plan: &CampaignPlan) -> bool {
        self.metrics.waves.len() == plan.expected_waves()
    }
}

/// Drives the full itinerary: endpoints sequentially, levels in configured
/// order, waves 1..W in sequence, with a pause between consecutive waves.
/// Stops early on a shutdown signal or when the campaign timeout expires;
/// either way the accumulators contain only whole waves.
pub async fn run_campaign(
    client: &Client,
    plan: &CampaignPlan,
    shutdown_tx: &ShutdownSender,
) -> CampaignCompletion {
    let mut metrics = CampaignMetrics::new();
    let mut endpoints = match &plan.target {
        CampaignTarget::Single(_) => Vec::new(),
        CampaignTarget::Endpoints(specs) => specs
            .iter()
            .map(|spec| EndpointMetrics::new(spec.name.clone(), spec.url.clone()))
            .collect(),
    };
    let mut shutdown_rx = shutdown_tx.subscribe();

    let interruption = {
        let itinerary = run_itinerary(client, plan, &mut metrics, &mut endpoints);
        tokio::pin!(itinerary);
        tokio::select! {
            () = &mut itinerary => None,
            _ = shutdown_rx.recv() => {
                warn!("Shutdown signal received, interrupting the campaign");
                Some("Shutdown signal received".to_owned())
            }
            () = sleep(plan.campaign_timeout) => {
                warn!(
                    "Campaign timed out after {}ms, interrupting",
                    plan.campaign_timeout.as_millis()
                );
                Some(format!(
                    "Campaign timed out after {}ms",
                    plan.campaign_timeout.as_millis()
                ))
            }
        }
    };

    metrics.finish();

    CampaignCompletion {
        metrics,
        endpoints,
        interruption,
    }
}

struct TargetLeg {
    endpoint_index: Option<usize>,
    name: Option<String>,
    url: String,
}

fn target_legs(plan: &CampaignPlan) -> Vec<TargetLeg> {
    match &plan.target {
        CampaignTarget::Single(url) => vec![TargetLeg {
            endpoint_index: None,
            name: None,
            url: url.clone(),
        }],
        CampaignTarget::Endpoints(specs) => specs
            .iter()
            .enumerate()
            .map(|(index, spec)| TargetLeg {
                endpoint_index: Some(index),
                name: Some(spec.name.clone()),
                url: spec.url.clone(),
            })
            .collect(),
    }
}

async fn run_itinerary(
    client: &Client,
    plan: &CampaignPlan,
    metrics: &mut CampaignMetrics,
    endpoints: &mut [EndpointMetrics],
) {
    let itinerary_size = plan.expected_waves();
    let mut completed: usize = 0;

    for leg in target_legs(plan) {
        if let Some(name) = leg.name.as_deref() {
            info!("Testing endpoint '{}' ({})", name, leg.url);
        }
        let mut scoped = leg
            .endpoint_index
            .and_then(|index| endpoints.get_mut(index));

        for &level in &plan.levels {
            info!("Testing with {} concurrent users", level);
            for wave_number in 1..=plan.waves {
                let context = WaveContext {
                    client,
                    url: &leg.url,
                    endpoint: leg.name.as_deref(),
                    concurrency: level,
                    wave_number,
                    total_waves: plan.waves,
                };
                run_wave(&context, metrics, scoped.as_deref_mut()).await;

                completed = completed.saturating_add(1);
                if completed < itinerary_size {
                    info!(
                        "Waiting {}ms before next wave...",
                        plan.time_between_waves.as_millis()
                    );
                    sleep(plan.time_between_waves).await;
                }
            }
        }
    }
}
