//! Campaign metrics accumulation and statistics.

mod grouping;
mod percentiles;
mod types;


pub use grouping::{LevelBreakdown, group_by_concurrency};
pub use percentiles::{ResponseTimeStats, percentile};
pub use types::{CampaignMetrics, EndpointMetrics, RequestOutcome, Thresholds, WaveResult};
