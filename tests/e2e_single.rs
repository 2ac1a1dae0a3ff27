mod support;

use std::fs;
use std::time::Duration;

use serde_json::Value;
use tempfile::tempdir;

use support::{
    ServerBehavior, find_report_pair, run_wavecheck, run_wavecheck_in, spawn_http_server_or_skip,
};

fn read_json(path: &std::path::Path) -> Result<Value, String> {
    let text = fs::read_to_string(path).map_err(|err| format!("read report failed: {}", err))?;
    serde_json::from_str(&text).map_err(|err| format!("report did not parse: {}", err))
}

#[test]
fn e2e_single_pass_writes_reports() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(ServerBehavior::AlwaysOk)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let reports_path = dir.path().to_string_lossy().into_owned();

    let args = vec![
        "--url".to_owned(),
        url.clone(),
        "--users".to_owned(),
        "2".to_owned(),
        "--users".to_owned(),
        "3".to_owned(),
        "--waves".to_owned(),
        "2".to_owned(),
        "--time-between-waves".to_owned(),
        "100ms".to_owned(),
        "--reports-path".to_owned(),
        reports_path,
        "--no-charts".to_owned(),
    ];

    let output = run_wavecheck(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("--- Stress Test Summary ---") {
        return Err(format!("Expected the summary block, got: {}", stdout));
    }
    if !stdout.contains("Verdict: PASS") {
        return Err(format!("Expected a PASS verdict, got: {}", stdout));
    }
    if !stdout.contains("Report saved to: ") {
        return Err(format!("Expected the report path line, got: {}", stdout));
    }

    let (json_path, html_path) = find_report_pair(dir.path())?;
    let report = read_json(&json_path)?;
    if report.pointer("/summary/total_requests").and_then(Value::as_u64) != Some(10) {
        return Err(format!("Unexpected total_requests in {}", report));
    }
    if report
        .pointer("/summary/completed_successfully")
        .and_then(Value::as_bool)
        != Some(true)
    {
        return Err("Expected completed_successfully to be true.".to_owned());
    }
    if report.pointer("/config/target").and_then(Value::as_str) != Some(url.as_str()) {
        return Err("Expected the config block to echo the target.".to_owned());
    }
    if report
        .pointer("/waves")
        .and_then(Value::as_array)
        .map(Vec::len)
        != Some(4)
    {
        return Err("Expected four waves in the ledger.".to_owned());
    }
    if report
        .pointer("/by_concurrency/2/total_requests")
        .and_then(Value::as_u64)
        != Some(4)
    {
        return Err("Expected the 2-user level to total four requests.".to_owned());
    }
    if report
        .pointer("/by_concurrency/3/total_requests")
        .and_then(Value::as_u64)
        != Some(6)
    {
        return Err("Expected the 3-user level to total six requests.".to_owned());
    }
    if report.pointer("/response_times/p95_ms").is_none() {
        return Err("Expected the percentile block.".to_owned());
    }

    let html = fs::read_to_string(&html_path).map_err(|err| format!("read html failed: {}", err))?;
    if !html.contains("<!DOCTYPE html>") {
        return Err("Expected a standalone HTML report.".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_threshold_breach_fails_but_still_reports() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(ServerBehavior::FailEveryTenth)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let reports_path = dir.path().to_string_lossy().into_owned();

    let args = vec![
        "--url".to_owned(),
        url,
        "--users".to_owned(),
        "20".to_owned(),
        "--waves".to_owned(),
        "1".to_owned(),
        "--reports-path".to_owned(),
        reports_path,
        "--no-charts".to_owned(),
    ];

    let output = run_wavecheck(args)?;
    if output.status.success() {
        return Err("Expected a non-zero exit on a threshold breach.".to_owned());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Verdict: FAIL") {
        return Err(format!("Expected a FAIL verdict, got: {}", stdout));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("ThresholdsBreached") {
        return Err(format!("Expected the breach error, got: {}", stderr));
    }

    let (json_path, _html_path) = find_report_pair(dir.path())?;
    let report = read_json(&json_path)?;
    if report
        .pointer("/summary/completed_successfully")
        .and_then(Value::as_bool)
        != Some(true)
    {
        return Err("A breached run with a full itinerary still completes.".to_owned());
    }
    if report
        .pointer("/summary/failed_requests")
        .and_then(Value::as_u64)
        != Some(2)
    {
        return Err(format!("Unexpected failed_requests in {}", report));
    }
    let error_rate = report
        .pointer("/summary/error_rate")
        .and_then(Value::as_f64)
        .ok_or_else(|| "Missing error_rate.".to_owned())?;
    if (error_rate - 0.10).abs() > 1e-9 {
        return Err(format!("Unexpected error_rate: {}", error_rate));
    }
    Ok(())
}

#[test]
fn e2e_interrupted_run_emits_an_emergency_report() -> Result<(), String> {
    let behavior = ServerBehavior::Delay(Duration::from_millis(50));
    let Some((url, _server)) = spawn_http_server_or_skip(behavior)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let reports_path = dir.path().to_string_lossy().into_owned();

    let args = vec![
        "--url".to_owned(),
        url,
        "--users".to_owned(),
        "2".to_owned(),
        "--waves".to_owned(),
        "3".to_owned(),
        "--time-between-waves".to_owned(),
        "1s".to_owned(),
        "--campaign-timeout".to_owned(),
        "400ms".to_owned(),
        "--reports-path".to_owned(),
        reports_path,
        "--no-charts".to_owned(),
    ];

    let output = run_wavecheck(args)?;
    if output.status.success() {
        return Err("Expected a non-zero exit on an interrupted campaign.".to_owned());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("CampaignInterrupted") {
        return Err(format!("Expected the interruption error, got: {}", stderr));
    }

    let (json_path, _html_path) = find_report_pair(dir.path())?;
    let report = read_json(&json_path)?;
    let reason = report
        .pointer("/interruption_reason")
        .and_then(Value::as_str)
        .ok_or_else(|| "Missing interruption_reason.".to_owned())?;
    if !reason.contains("timed out") {
        return Err(format!("Unexpected interruption reason: {}", reason));
    }
    if report
        .pointer("/summary/completed_successfully")
        .and_then(Value::as_bool)
        != Some(false)
    {
        return Err("An interrupted run must not be marked complete.".to_owned());
    }
    if report
        .pointer("/waves")
        .and_then(Value::as_array)
        .map(Vec::len)
        != Some(1)
    {
        return Err("Expected exactly the first wave in the emergency report.".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_bare_invocation_prints_help() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_wavecheck_in(dir.path(), Vec::<String>::new())?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Usage") {
        return Err(format!("Expected the help text, got: {}", stdout));
    }
    Ok(())
}
