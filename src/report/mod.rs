//! Report assembly and emission: JSON artifact, HTML artifact with inline
//! SVG charts, console summary, and the pass/fail verdict.
mod charts;
mod emit;
mod html;
mod model;
mod naming;
mod summary;
mod verdict;


pub use emit::{ReportPaths, emit_reports};
pub use model::{CampaignReport, EndpointReport, ReportConfig, ReportSummary, WaveEntry};
pub use summary::print_summary;
pub use verdict::evaluate_verdict;
