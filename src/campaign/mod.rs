//! Wave fan-out and campaign orchestration.

mod emergency;
mod orchestrator;
mod plan;
mod wave;


pub use emergency::EmergencyGuard;
pub use orchestrator::{CampaignCompletion, run_campaign};
pub use plan::{CampaignPlan, CampaignTarget};
pub use wave::{WaveContext, run_wave};
