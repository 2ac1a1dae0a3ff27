use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{CampaignArgs, EndpointSpec, PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, EndpointEntry};

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_ratio(value: f64, field: &str) -> AppResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(AppError::config(ConfigError::FieldMustBeRatio {
            field: field.to_owned(),
        }));
    }
    Ok(value)
}

fn parse_endpoint_entries(entries: &[EndpointEntry]) -> AppResult<Vec<EndpointSpec>> {
    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        parsed.push(
            EndpointSpec::new(&entry.name, &entry.url)
                .map_err(|err| AppError::config(ConfigError::InvalidEndpoint { source: err }))?,
        );
    }
    Ok(parsed)
}

/// Applies configuration values to CLI arguments.
///
/// Values only apply where the matching flag was not given on the command
/// line. The `url`/`endpoints` pair is gated as one group so a CLI target
/// always wins over a configured one.
///
/// # Errors
///
/// Returns an error when a config value fails validation.
pub fn apply_config(
    args: &mut CampaignArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    let target_from_cli = is_cli(matches, "url") || is_cli(matches, "endpoints");
    if !target_from_cli {
        if let Some(url) = config.url.clone() {
            args.url = Some(url);
        }
        if let Some(entries) = config.endpoints.as_ref() {
            args.endpoints = parse_endpoint_entries(entries)?;
        }
    }

    if !is_cli(matches, "users")
        && let Some(users) = config.users.as_ref()
    {
        let mut levels = Vec::with_capacity(users.len());
        for value in users {
            levels.push(ensure_positive_usize(*value, "users")?);
        }
        args.users = levels;
    }

    if !is_cli(matches, "waves")
        && let Some(waves) = config.waves
    {
        args.waves = ensure_positive_usize(waves, "waves")?;
    }

    if !is_cli(matches, "time_between_waves")
        && let Some(pause) = config.time_between_waves.as_ref()
    {
        args.time_between_waves = pause.to_duration("time_between_waves")?;
    }

    if !is_cli(matches, "campaign_timeout")
        && let Some(timeout) = config.campaign_timeout.as_ref()
    {
        args.campaign_timeout = timeout.to_duration("campaign_timeout")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration("timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = timeout.to_duration("connect_timeout")?;
    }

    if !is_cli(matches, "max_avg_response_time")
        && let Some(threshold_ms) = config.max_avg_response_time_ms
    {
        let threshold_ms = ensure_positive_u64(threshold_ms, "max_avg_response_time_ms")?;
        args.max_avg_response_time = Duration::from_millis(threshold_ms.get());
    }

    if !is_cli(matches, "max_error_rate")
        && let Some(rate) = config.max_error_rate
    {
        args.max_error_rate = ensure_ratio(rate, "max_error_rate")?;
    }

    if !is_cli(matches, "reports_path")
        && let Some(path) = config.reports_path.clone()
    {
        args.reports_path = path;
    }

    if !is_cli(matches, "no_charts")
        && let Some(no_charts) = config.no_charts
    {
        args.no_charts = no_charts;
    }

    if !is_cli(matches, "insecure")
        && let Some(insecure) = config.insecure
    {
        args.insecure = insecure;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}
