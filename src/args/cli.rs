use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_CONCURRENT_USERS, default_reports_path};
use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_endpoint, parse_positive_usize, parse_ratio,
};
use super::types::{EndpointSpec, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Wave-based HTTP load campaigns in Rust - ramped concurrency, latency percentiles, pass/fail thresholds, and JSON + HTML reports with charts.",
    next_help_heading = "Advanced Options"
)]
pub struct CampaignArgs {
    /// Target URL for a single-endpoint campaign
    #[arg(long, short, help_heading = "Common Options")]
    pub url: Option<String>,

    /// Named endpoint in 'name=url' format (repeatable, visited in order)
    #[arg(
        long = "endpoint",
        value_parser = parse_endpoint,
        conflicts_with = "url",
        help_heading = "Common Options"
    )]
    pub endpoints: Vec<EndpointSpec>,

    /// Concurrent users per wave (repeatable, ramps in order; default: 20 50 100)
    #[arg(
        long = "users",
        short = 'U',
        value_parser = parse_positive_usize,
        help_heading = "Common Options"
    )]
    pub users: Vec<PositiveUsize>,

    /// Number of waves per concurrency level
    #[arg(
        long = "waves",
        short = 'w',
        default_value = "3",
        value_parser = parse_positive_usize,
        help_heading = "Common Options"
    )]
    pub waves: PositiveUsize,

    /// Pause between consecutive waves (supports ms/s/m/h)
    #[arg(
        long = "time-between-waves",
        default_value = "2s",
        value_parser = parse_duration_arg,
        help_heading = "Common Options"
    )]
    pub time_between_waves: Duration,

    /// Fail the run when the campaign-wide average response time exceeds this (supports ms/s/m/h)
    #[arg(
        long = "max-avg-response-time",
        default_value = "4s",
        value_parser = parse_duration_arg,
        help_heading = "Common Options"
    )]
    pub max_avg_response_time: Duration,

    /// Fail the run when the campaign-wide error rate exceeds this ratio (0 to 1)
    #[arg(
        long = "max-error-rate",
        default_value = "0.05",
        value_parser = parse_ratio,
        help_heading = "Common Options"
    )]
    pub max_error_rate: f64,

    /// Abort the campaign and write an emergency report after this long (supports ms/s/m/h)
    #[arg(
        long = "campaign-timeout",
        default_value = "5m",
        value_parser = parse_duration_arg
    )]
    pub campaign_timeout: Duration,

    /// Request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "10s",
        value_parser = parse_duration_arg,
        help_heading = "Common Options"
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Directory to write JSON and HTML reports to
    #[arg(
        long = "reports-path",
        default_value_t = default_reports_path(),
        help_heading = "Common Options"
    )]
    pub reports_path: String,

    /// Skip chart rendering in the HTML report
    #[arg(long, help_heading = "Common Options")]
    pub no_charts: bool,

    /// (TLS) Accept invalid certs
    #[arg(long = "insecure")]
    pub insecure: bool,

    /// Path to config file (TOML/JSON). Defaults to ./wavecheck.toml or ./wavecheck.json if present.
    #[arg(long, help_heading = "Common Options")]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by WAVECHECK_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "debug", help_heading = "Common Options")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl CampaignArgs {
    /// Concurrency ramp for the run, falling back to the built-in
    /// 20/50/100 ramp when no `--users` values were given.
    #[must_use]
    pub fn concurrency_levels(&self) -> Vec<usize> {
        if self.users.is_empty() {
            DEFAULT_CONCURRENT_USERS.to_vec()
        } else {
            self.users.iter().map(|level| level.get()).collect()
        }
    }
}
