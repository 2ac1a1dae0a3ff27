use super::defaults::default_reports_path;
use super::parsers::{parse_bool_env, parse_duration_arg, parse_endpoint, parse_ratio};
use super::test_support::parse_test_args;
use super::*;
use crate::error::{AppError, AppResult, ValidationError};
use std::time::Duration;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["wavecheck", "-u", "http://localhost"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);

    let expected_reports = default_reports_path();

    let checks = [
        (
            args.url.as_deref() == Some("http://localhost"),
            "Unexpected url",
        ),
        (args.endpoints.is_empty(), "Expected endpoints to be empty"),
        (args.users.is_empty(), "Expected users to be empty"),
        (args.waves.get() == 3, "Unexpected waves"),
        (
            args.time_between_waves == Duration::from_secs(2),
            "Unexpected time_between_waves",
        ),
        (
            args.max_avg_response_time == Duration::from_secs(4),
            "Unexpected max_avg_response_time",
        ),
        (
            (args.max_error_rate - 0.05).abs() < f64::EPSILON,
            "Unexpected max_error_rate",
        ),
        (
            args.campaign_timeout == Duration::from_secs(300),
            "Unexpected campaign_timeout",
        ),
        (
            args.request_timeout == Duration::from_secs(10),
            "Unexpected request_timeout",
        ),
        (
            args.connect_timeout == Duration::from_secs(5),
            "Unexpected connect_timeout",
        ),
        (
            args.reports_path == expected_reports,
            "Unexpected reports_path",
        ),
        (!args.no_charts, "Expected no_charts to be false"),
        (!args.insecure, "Expected insecure to be false"),
        (args.config.is_none(), "Expected config to be None"),
        (!args.verbose, "Expected verbose to be false"),
        (
            args.no_color == expected_no_color,
            "Unexpected no_color default",
        ),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }

    Ok(())
}

#[test]
fn parse_args_endpoints_in_order() -> AppResult<()> {
    let args = parse_test_args([
        "wavecheck",
        "--endpoint",
        "home=http://localhost/",
        "--endpoint",
        "health=http://localhost/api/health",
    ])?;

    if args.endpoints.len() != 2 {
        return Err(AppError::validation("Expected two endpoints"));
    }
    let first = args
        .endpoints
        .first()
        .ok_or_else(|| AppError::validation("Expected a first endpoint"))?;
    if first.name != "home" || first.url != "http://localhost/" {
        return Err(AppError::validation("Unexpected first endpoint"));
    }
    let second = args
        .endpoints
        .get(1)
        .ok_or_else(|| AppError::validation("Expected a second endpoint"))?;
    if second.name != "health" || second.url != "http://localhost/api/health" {
        return Err(AppError::validation("Unexpected second endpoint"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_url_combined_with_endpoint() -> AppResult<()> {
    let result = parse_test_args([
        "wavecheck",
        "-u",
        "http://localhost",
        "--endpoint",
        "api=http://localhost/api",
    ]);
    if result.is_ok() {
        return Err(AppError::validation(
            "Expected --url and --endpoint to conflict",
        ));
    }
    Ok(())
}

#[test]
fn parse_args_users_ramp_in_order() -> AppResult<()> {
    let args = parse_test_args([
        "wavecheck",
        "-u",
        "http://localhost",
        "-U",
        "10",
        "-U",
        "25",
        "-U",
        "50",
    ])?;
    let levels: Vec<usize> = args.users.iter().map(|users| users.get()).collect();
    if levels != [10, 25, 50] {
        return Err(AppError::validation("Unexpected concurrency levels"));
    }
    Ok(())
}

#[test]
fn concurrency_levels_fall_back_to_the_built_in_ramp() -> AppResult<()> {
    let args = parse_test_args(["wavecheck", "-u", "http://localhost"])?;
    if args.concurrency_levels() != [20, 50, 100] {
        return Err(AppError::validation("Unexpected default ramp"));
    }

    let explicit = parse_test_args(["wavecheck", "-u", "http://localhost", "-U", "8"])?;
    if explicit.concurrency_levels() != [8] {
        return Err(AppError::validation("Expected explicit levels to win"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_users() -> AppResult<()> {
    let result = parse_test_args(["wavecheck", "-u", "http://localhost", "-U", "0"]);
    if result.is_ok() {
        return Err(AppError::validation("Expected zero users to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_args_duration_units() -> AppResult<()> {
    let args = parse_test_args([
        "wavecheck",
        "-u",
        "http://localhost",
        "--time-between-waves",
        "250ms",
        "--campaign-timeout",
        "2m",
        "--timeout",
        "30",
    ])?;

    let checks = [
        (
            args.time_between_waves == Duration::from_millis(250),
            "Unexpected time_between_waves",
        ),
        (
            args.campaign_timeout == Duration::from_secs(120),
            "Unexpected campaign_timeout",
        ),
        (
            args.request_timeout == Duration::from_secs(30),
            "Expected a bare number to mean seconds",
        ),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }

    Ok(())
}

#[test]
fn parse_args_verbose_debug_alias() -> AppResult<()> {
    let args = parse_test_args(["wavecheck", "-u", "http://localhost", "--debug"])?;
    if !args.verbose {
        return Err(AppError::validation("Expected --debug to set verbose"));
    }
    Ok(())
}

#[test]
fn parse_duration_arg_rejects_invalid_input() -> AppResult<()> {
    match parse_duration_arg("") {
        Err(AppError::Validation(ValidationError::DurationEmpty)) => {}
        other => {
            return Err(AppError::validation(format!(
                "Expected DurationEmpty, got {:?}",
                other
            )));
        }
    }
    match parse_duration_arg("abc") {
        Err(AppError::Validation(ValidationError::InvalidDurationFormat { .. })) => {}
        other => {
            return Err(AppError::validation(format!(
                "Expected InvalidDurationFormat, got {:?}",
                other
            )));
        }
    }
    match parse_duration_arg("10x") {
        Err(AppError::Validation(ValidationError::InvalidDurationUnit { .. })) => {}
        other => {
            return Err(AppError::validation(format!(
                "Expected InvalidDurationUnit, got {:?}",
                other
            )));
        }
    }
    match parse_duration_arg("0s") {
        Err(AppError::Validation(ValidationError::DurationZero)) => {}
        other => {
            return Err(AppError::validation(format!(
                "Expected DurationZero, got {:?}",
                other
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_endpoint_validates_shape() -> Result<(), String> {
    let spec =
        parse_endpoint("health=http://localhost/health").map_err(|err| err.to_string())?;
    if spec.name != "health" || spec.url != "http://localhost/health" {
        return Err("Unexpected endpoint spec".to_owned());
    }

    match parse_endpoint("no-separator") {
        Err(ValidationError::InvalidEndpointFormat { .. }) => {}
        other => return Err(format!("Expected InvalidEndpointFormat, got {:?}", other)),
    }
    match parse_endpoint("=http://localhost") {
        Err(ValidationError::EndpointNameEmpty { .. }) => {}
        other => return Err(format!("Expected EndpointNameEmpty, got {:?}", other)),
    }
    match parse_endpoint("api=not a url") {
        Err(ValidationError::InvalidUrl { .. }) => {}
        other => return Err(format!("Expected InvalidUrl, got {:?}", other)),
    }
    match parse_endpoint("api=data:text/plain,hi") {
        Err(ValidationError::UrlMissingHost { .. }) => {}
        other => return Err(format!("Expected UrlMissingHost, got {:?}", other)),
    }
    Ok(())
}

#[test]
fn parse_ratio_bounds() -> Result<(), String> {
    let value = parse_ratio("0.05").map_err(|err| err.to_string())?;
    if (value - 0.05).abs() >= f64::EPSILON {
        return Err("Unexpected ratio value".to_owned());
    }
    for edge in ["0", "1", "0.0", "1.0"] {
        if parse_ratio(edge).is_err() {
            return Err(format!("Expected '{}' to be a valid ratio", edge));
        }
    }
    for bad in ["1.5", "-0.2", "NaN", "inf", "abc", ""] {
        match parse_ratio(bad) {
            Err(ValidationError::InvalidRatio { .. }) => {}
            other => return Err(format!("Expected InvalidRatio for '{}', got {:?}", bad, other)),
        }
    }
    Ok(())
}

#[test]
fn parse_bool_env_accepts_common_forms() -> AppResult<()> {
    for truthy in ["1", "true", "YES", "on", "y"] {
        if !parse_bool_env(truthy)? {
            return Err(AppError::validation("Expected a truthy value"));
        }
    }
    for falsy in ["0", "false", "No", "off", "n"] {
        if parse_bool_env(falsy)? {
            return Err(AppError::validation("Expected a falsy value"));
        }
    }
    if parse_bool_env("maybe").is_ok() {
        return Err(AppError::validation("Expected 'maybe' to be rejected"));
    }
    Ok(())
}
