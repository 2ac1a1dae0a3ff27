use std::time::Duration;

use crate::args::EndpointSpec;
use crate::metrics::Thresholds;

/// What the campaign drives: one bare URL or an ordered endpoint list.
#[derive(Debug, Clone)]
pub enum CampaignTarget {
    Single(String),
    Endpoints(Vec<EndpointSpec>),
}

/// Everything the orchestrator needs for one run, fixed at start.
#[derive(Debug, Clone)]
pub struct CampaignPlan {
    pub target: CampaignTarget,
    pub levels: Vec<usize>,
    pub waves: usize,
    pub time_between_waves: Duration,
    pub campaign_timeout: Duration,
    pub thresholds: Thresholds,
}

impl CampaignPlan {
    /// Number of waves the full itinerary will run.
    #[must_use]
    pub fn expected_waves(&self) -> usize {
        self.levels
            .len()
            .saturating_mul(self.waves)
            .saturating_mul(self.target_count())
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        match &self.target {
            CampaignTarget::Single(_) => 1,
            CampaignTarget::Endpoints(endpoints) => endpoints.len(),
        }
    }
}
