use chrono::{DateTime, Utc};
use serde::Serialize;

/// Classified result of one request attempt. Transport failures, timeouts
/// and non-2xx statuses are all recorded as data, never as errors.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub id: String,
    pub status: Option<u16>,
    pub success: bool,
    pub response_time_ms: u64,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl RequestOutcome {
    /// The request completed with a status line; success means 2xx.
    #[must_use]
    pub fn completed(id: String, status: u16, response_time_ms: u64) -> Self {
        Self {
            id,
            status: Some(status),
            success: (200..300).contains(&status),
            response_time_ms,
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// The request never produced a status line (transport failure, timeout).
    #[must_use]
    pub fn failed(id: String, response_time_ms: u64, error: String) -> Self {
        Self {
            id,
            status: None,
            success: false,
            response_time_ms,
            error: Some(error),
            timestamp: Utc::now(),
        }
    }
}

/// Aggregates derived once from a wave's outcome set when the wave joins.
#[derive(Debug, Clone)]
pub struct WaveResult {
    pub endpoint: Option<String>,
    pub concurrency: usize,
    pub wave_number: usize,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub error_rate: f64,
    pub avg_response_time_ms: f64,
    pub duration_ms: u64,
    pub outcomes: Vec<RequestOutcome>,
}

impl WaveResult {
    #[must_use]
    pub fn from_outcomes(
        endpoint: Option<String>,
        concurrency: usize,
        wave_number: usize,
        outcomes: Vec<RequestOutcome>,
        duration_ms: u64,
    ) -> Self {
        let total_requests = outcomes.len() as u64;
        let successful_requests = outcomes.iter().filter(|outcome| outcome.success).count() as u64;
        let failed_requests = total_requests.saturating_sub(successful_requests);
        let error_rate = if total_requests > 0 {
            failed_requests as f64 / total_requests as f64
        } else {
            0.0
        };
        let avg_response_time_ms = if total_requests > 0 {
            let sum_ms = outcomes
                .iter()
                .map(|outcome| outcome.response_time_ms)
                .fold(0_u64, u64::saturating_add);
            sum_ms as f64 / total_requests as f64
        } else {
            0.0
        };

        Self {
            endpoint,
            concurrency,
            wave_number,
            total_requests,
            successful_requests,
            failed_requests,
            error_rate,
            avg_response_time_ms,
            duration_ms,
            outcomes,
        }
    }
}

/// Campaign-wide accumulator, one per run, owned by the orchestrator.
/// Mutated only through whole-wave ingestion so it is always readable.
#[derive(Debug)]
pub struct CampaignMetrics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub response_times: Vec<u64>,
    pub waves: Vec<WaveResult>,
}

impl CampaignMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
            response_times: Vec::new(),
            waves: Vec::new(),
        }
    }

    pub fn record_wave(&mut self, wave: &WaveResult) {
        self.total_requests = self.total_requests.saturating_add(wave.total_requests);
        self.successful_requests = self
            .successful_requests
            .saturating_add(wave.successful_requests);
        self.failed_requests = self.failed_requests.saturating_add(wave.failed_requests);
        self.response_times
            .extend(wave.outcomes.iter().map(|outcome| outcome.response_time_ms));
        self.waves.push(wave.clone());
    }

    /// Marks the campaign finished; later calls keep the first timestamp.
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    #[must_use]
    pub fn error_rate(&self) -> f64 {
        if self.total_requests > 0 {
            self.failed_requests as f64 / self.total_requests as f64
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn avg_response_time_ms(&self) -> f64 {
        if self.response_times.is_empty() {
            return 0.0;
        }
        let sum_ms = self
            .response_times
            .iter()
            .copied()
            .fold(0_u64, u64::saturating_add);
        sum_ms as f64 / self.response_times.len() as f64
    }

    /// Wall-clock span from campaign start to finish, or to now mid-run.
    #[must_use]
    pub fn total_duration_ms(&self) -> u64 {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        let millis = end.signed_duration_since(self.started_at).num_milliseconds();
        u64::try_from(millis).unwrap_or(0)
    }
}

impl Default for CampaignMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-endpoint accumulator used in multi-endpoint campaigns. The wave
/// ledger itself lives in [`CampaignMetrics`]; this tracks the scoped
/// totals and samples behind the report's per-endpoint breakdown.
#[derive(Debug)]
pub struct EndpointMetrics {
    pub name: String,
    pub url: String,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub response_times: Vec<u64>,
}

impl EndpointMetrics {
    #[must_use]
    pub const fn new(name: String, url: String) -> Self {
        Self {
            name,
            url,
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
            response_times: Vec::new(),
        }
    }

    pub fn record_wave(&mut self, wave: &WaveResult) {
        self.total_requests = self.total_requests.saturating_add(wave.total_requests);
        self.successful_requests = self
            .successful_requests
            .saturating_add(wave.successful_requests);
        self.failed_requests = self.failed_requests.saturating_add(wave.failed_requests);
        self.response_times
            .extend(wave.outcomes.iter().map(|outcome| outcome.response_time_ms));
    }

    #[must_use]
    pub fn error_rate(&self) -> f64 {
        if self.total_requests > 0 {
            self.failed_requests as f64 / self.total_requests as f64
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn avg_response_time_ms(&self) -> f64 {
        if self.response_times.is_empty() {
            return 0.0;
        }
        let sum_ms = self
            .response_times
            .iter()
            .copied()
            .fold(0_u64, u64::saturating_add);
        sum_ms as f64 / self.response_times.len() as f64
    }
}

/// Pass/fail bounds supplied at campaign start, read-only thereafter.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Thresholds {
    pub max_avg_response_time_ms: u64,
    pub max_error_rate: f64,
}
