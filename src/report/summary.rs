use crate::metrics::Thresholds;

use super::emit::ReportPaths;
use super::model::CampaignReport;
use super::verdict::threshold_breaches;

/// Console summary printed after the artifacts are written. Same numbers
/// the report files carry, plus where they landed.
pub fn print_summary(report: &CampaignReport, paths: &ReportPaths, thresholds: Thresholds) {
    let summary = &report.summary;
    let times = &report.response_times;

    println!("\n--- Stress Test Summary ---");
    println!("Total Requests: {}", summary.total_requests);
    println!("Successful Requests: {}", summary.successful_requests);
    println!("Failed Requests: {}", summary.failed_requests);
    println!("Error Rate: {:.2}%", summary.error_rate * 100.0);
    println!(
        "Average Response Time: {:.2}ms",
        summary.avg_response_time_ms
    );
    println!(
        "Min/Max Response Time: {}ms / {}ms",
        times.min_ms, times.max_ms
    );
    println!(
        "P50/P90/P95/P99 Latency: {:.2}ms / {:.2}ms / {:.2}ms / {:.2}ms",
        times.p50_ms, times.p90_ms, times.p95_ms, times.p99_ms
    );
    println!("Total Duration: {}ms", summary.total_duration_ms);
    if let Some(reason) = &report.interruption_reason {
        println!("Interrupted: {}", reason);
    }
    println!("Report saved to: {}", paths.json.display());
    println!("HTML Report saved to: {}", paths.html.display());
    if threshold_breaches(summary, thresholds).is_empty() {
        println!("Verdict: PASS");
    } else {
        println!("Verdict: FAIL");
    }
}
