use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult, ReportError};

use super::charts::render_charts;
use super::html::render_html;
use super::model::CampaignReport;
use super::naming::report_base_name;

/// Where one emission landed on disk.
#[derive(Debug)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub html: PathBuf,
}

/// Writes the JSON and HTML artifacts for one report under `reports_path`,
/// creating the directory if needed. The JSON artifact is written first so
/// a chart or HTML failure still leaves the machine-readable record behind.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the report fails to
/// serialize, chart rendering fails, or either file cannot be written.
pub async fn emit_reports(
    reports_path: &str,
    report: &CampaignReport,
    no_charts: bool,
) -> AppResult<ReportPaths> {
    let dir = Path::new(reports_path);
    tokio::fs::create_dir_all(dir).await.map_err(|source| {
        AppError::report(ReportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    })?;

    let base_name = report_base_name();
    let paths = ReportPaths {
        json: dir.join(format!("{}.json", base_name)),
        html: dir.join(format!("{}.html", base_name)),
    };

    let json = serde_json::to_string_pretty(report)
        .map_err(|source| AppError::report(ReportError::Serialize { source }))?;
    tokio::fs::write(&paths.json, json).await.map_err(|source| {
        AppError::report(ReportError::WriteJson {
            path: paths.json.clone(),
            source,
        })
    })?;
    debug!("Wrote JSON report to {}", paths.json.display());

    let charts = if no_charts {
        None
    } else {
        Some(render_charts(&report.waves)?)
    };
    let html = render_html(report, charts.as_ref());
    tokio::fs::write(&paths.html, html).await.map_err(|source| {
        AppError::report(ReportError::WriteHtml {
            path: paths.html.clone(),
            source,
        })
    })?;
    debug!("Wrote HTML report to {}", paths.html.display());

    Ok(paths)
}
