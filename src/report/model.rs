use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::args::EndpointSpec;
use crate::campaign::{CampaignCompletion, CampaignPlan, CampaignTarget};
use crate::metrics::{LevelBreakdown, ResponseTimeStats, Thresholds, group_by_concurrency};

/// Everything one campaign emission contains. Serialized verbatim as the
/// JSON artifact; the HTML renderer and the console summary read the same
/// struct so all three surfaces agree.
#[derive(Debug, Serialize)]
pub struct CampaignReport {
    pub timestamp: String,
    pub config: ReportConfig,
    pub summary: ReportSummary,
    pub waves: Vec<WaveEntry>,
    pub response_times: ResponseTimeStats,
    pub by_concurrency: BTreeMap<usize, LevelBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<EndpointReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interruption_reason: Option<String>,
}

/// Echo of the campaign parameters the run was started with.
#[derive(Debug, Serialize)]
pub struct ReportConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<EndpointSpec>>,
    pub concurrent_users: Vec<usize>,
    pub waves: usize,
    pub time_between_waves_ms: u64,
    pub thresholds: Thresholds,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub error_rate: f64,
    pub total_duration_ms: u64,
    pub avg_response_time_ms: f64,
    pub completed_successfully: bool,
}

/// One row of the wave ledger. `endpoint` is set in multi-endpoint mode.
#[derive(Debug, Serialize)]
pub struct WaveEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub concurrency: usize,
    pub wave_number: usize,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub error_rate: f64,
    pub avg_response_time_ms: f64,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct EndpointReport {
    pub name: String,
    pub url: String,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub error_rate: f64,
    pub avg_response_time_ms: f64,
    pub response_times: ResponseTimeStats,
}

impl CampaignReport {
    /// Assembles the full report from a finished (or interrupted) campaign.
    #[must_use]
    pub fn build(plan: &CampaignPlan, completion: &CampaignCompletion) -> Self {
        let metrics = &completion.metrics;
        let (target, endpoint_specs) = match &plan.target {
            CampaignTarget::Single(url) => (Some(url.clone()), None),
            CampaignTarget::Endpoints(specs) => (None, Some(specs.clone())),
        };

        let endpoints = match &plan.target {
            CampaignTarget::Single(_) => None,
            CampaignTarget::Endpoints(_) => Some(
                completion
                    .endpoints
                    .iter()
                    .map(|endpoint| EndpointReport {
                        name: endpoint.name.clone(),
                        url: endpoint.url.clone(),
                        total_requests: endpoint.total_requests,
                        successful_requests: endpoint.successful_requests,
                        failed_requests: endpoint.failed_requests,
                        error_rate: endpoint.error_rate(),
                        avg_response_time_ms: endpoint.avg_response_time_ms(),
                        response_times: ResponseTimeStats::from_samples(&endpoint.response_times),
                    })
                    .collect(),
            ),
        };

        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            config: ReportConfig {
                target,
                endpoints: endpoint_specs,
                concurrent_users: plan.levels.clone(),
                waves: plan.waves,
                time_between_waves_ms: u64::try_from(plan.time_between_waves.as_millis())
                    .unwrap_or(u64::MAX),
                thresholds: plan.thresholds,
            },
            summary: ReportSummary {
                total_requests: metrics.total_requests,
                successful_requests: metrics.successful_requests,
                failed_requests: metrics.failed_requests,
                error_rate: metrics.error_rate(),
                total_duration_ms: metrics.total_duration_ms(),
                avg_response_time_ms: metrics.avg_response_time_ms(),
                completed_successfully: completion.completed_successfully(plan),
            },
            waves: metrics
                .waves
                .iter()
                .map(|wave| WaveEntry {
                    endpoint: wave.endpoint.clone(),
                    concurrency: wave.concurrency,
                    wave_number: wave.wave_number,
                    total_requests: wave.total_requests,
                    successful_requests: wave.successful_requests,
                    failed_requests: wave.failed_requests,
                    error_rate: wave.error_rate,
                    avg_response_time_ms: wave.avg_response_time_ms,
                    duration_ms: wave.duration_ms,
                })
                .collect(),
            response_times: ResponseTimeStats::from_samples(&metrics.response_times),
            by_concurrency: group_by_concurrency(&metrics.waves),
            endpoints,
            interruption_reason: completion.interruption.clone(),
        }
    }

    /// True when the report describes a multi-endpoint campaign.
    #[must_use]
    pub const fn is_multi_endpoint(&self) -> bool {
        self.endpoints.is_some()
    }
}
