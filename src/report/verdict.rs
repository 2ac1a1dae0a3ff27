use tracing::error;

use crate::error::{AppError, AppResult, ValidationError};
use crate::metrics::Thresholds;

use super::model::ReportSummary;

/// Breach descriptions, one per exceeded threshold. Empty means PASS.
pub(crate) fn threshold_breaches(summary: &ReportSummary, thresholds: Thresholds) -> Vec<String> {
    let mut breaches = Vec::new();
    if summary.avg_response_time_ms >= thresholds.max_avg_response_time_ms as f64 {
        breaches.push(format!(
            "Average response time ({:.2}ms) exceeds threshold ({}ms)",
            summary.avg_response_time_ms, thresholds.max_avg_response_time_ms
        ));
    }
    if summary.error_rate >= thresholds.max_error_rate {
        breaches.push(format!(
            "Error rate ({:.2}%) exceeds threshold ({:.2}%)",
            summary.error_rate * 100.0,
            thresholds.max_error_rate * 100.0
        ));
    }
    breaches
}

/// PASS iff the campaign average and error rate are both under their bounds.
/// Runs only after both report artifacts are on disk; each breach is logged
/// before the combined failure is returned.
///
/// # Errors
///
/// Returns `ValidationError::ThresholdsBreached` naming every exceeded bound.
pub fn evaluate_verdict(summary: &ReportSummary, thresholds: Thresholds) -> AppResult<()> {
    let breaches = threshold_breaches(summary, thresholds);
    if breaches.is_empty() {
        return Ok(());
    }
    for breach in &breaches {
        error!("{}", breach);
    }
    Err(AppError::validation(ValidationError::ThresholdsBreached {
        details: breaches.join("; "),
    }))
}
