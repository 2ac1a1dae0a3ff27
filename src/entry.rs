use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::error;

use crate::args::{CampaignArgs, EndpointSpec};
use crate::campaign::{
    CampaignCompletion, CampaignPlan, CampaignTarget, EmergencyGuard, run_campaign,
};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::build_client;
use crate::metrics::Thresholds;
use crate::report::{CampaignReport, emit_reports, evaluate_verdict, print_summary};
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};

/// Default config filenames checked when no CLI args are provided.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["wavecheck.toml", "wavecheck.json"];

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<Option<(CampaignArgs, ArgMatches)>> {
    let mut cmd = CampaignArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = CampaignArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(mut args: CampaignArgs, matches: &ArgMatches) -> AppResult<()> {
    let loaded_config = load_config(args.config.as_deref())?;
    if let Some(config) = loaded_config.as_ref() {
        apply_config(&mut args, matches, config)?;
    }

    let plan = build_plan(&args)?;
    let client = build_client(&args)?;

    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let guard = EmergencyGuard::new();

    let completion = run_campaign(&client, &plan, &shutdown_tx).await;

    drop(shutdown_tx.send(()));
    drop(signal_handle.await);

    finalize(&args, &plan, &completion, &guard).await
}

fn build_plan(args: &CampaignArgs) -> AppResult<CampaignPlan> {
    let target = resolve_target(args)?;
    let levels = args.concurrency_levels();
    let max_avg_response_time_ms =
        u64::try_from(args.max_avg_response_time.as_millis()).unwrap_or(u64::MAX);

    Ok(CampaignPlan {
        target,
        levels,
        waves: args.waves.get(),
        time_between_waves: args.time_between_waves,
        campaign_timeout: args.campaign_timeout,
        thresholds: Thresholds {
            max_avg_response_time_ms,
            max_error_rate: args.max_error_rate,
        },
    })
}

fn resolve_target(args: &CampaignArgs) -> AppResult<CampaignTarget> {
    match (args.url.as_deref(), args.endpoints.as_slice()) {
        (Some(_), [_, ..]) => Err(AppError::validation(ValidationError::TargetConflict)),
        (Some(url), []) => Ok(CampaignTarget::Single(url.to_owned())),
        (None, []) => {
            error!("Missing target (set --url or --endpoint, or provide one in config).");
            Err(AppError::validation(ValidationError::MissingTarget))
        }
        (None, endpoints) => {
            ensure_unique_names(endpoints)?;
            Ok(CampaignTarget::Endpoints(endpoints.to_vec()))
        }
    }
}

fn ensure_unique_names(endpoints: &[EndpointSpec]) -> AppResult<()> {
    let mut seen = BTreeSet::new();
    for endpoint in endpoints {
        if !seen.insert(endpoint.name.as_str()) {
            return Err(AppError::validation(
                ValidationError::DuplicateEndpointName {
                    name: endpoint.name.clone(),
                },
            ));
        }
    }
    Ok(())
}

/// Emission on both exits goes through the one-shot guard: an interruption
/// fires it, a normal completion disarms it, so a run never writes the same
/// campaign twice.
async fn finalize(
    args: &CampaignArgs,
    plan: &CampaignPlan,
    completion: &CampaignCompletion,
    guard: &EmergencyGuard,
) -> AppResult<()> {
    if let Some(reason) = completion.interruption.clone() {
        if guard.fire() {
            emit_emergency_report(args, plan, completion).await;
        }
        return Err(AppError::validation(ValidationError::CampaignInterrupted {
            reason,
        }));
    }

    guard.disarm();
    let report = CampaignReport::build(plan, completion);
    let paths = emit_reports(&args.reports_path, &report, args.no_charts).await?;
    print_summary(&report, &paths, plan.thresholds);
    evaluate_verdict(&report.summary, plan.thresholds)
}

/// Best-effort: a write failure here is logged and swallowed so it cannot
/// mask the interruption that triggered it.
async fn emit_emergency_report(
    args: &CampaignArgs,
    plan: &CampaignPlan,
    completion: &CampaignCompletion,
) {
    let report = CampaignReport::build(plan, completion);
    match emit_reports(&args.reports_path, &report, args.no_charts).await {
        Ok(paths) => print_summary(&report, &paths, plan.thresholds),
        Err(err) => error!("Failed to write the emergency report: {}", err),
    }
}
