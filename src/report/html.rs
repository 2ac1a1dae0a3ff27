use super::charts::ReportCharts;
use super::model::CampaignReport;

/// Renders the standalone HTML artifact: inline CSS, no external assets,
/// charts embedded as inline SVG when provided.
pub(crate) fn render_html(report: &CampaignReport, charts: Option<&ReportCharts>) -> String {
    let multi = report.is_multi_endpoint();
    let summary = &report.summary;
    let times = &report.response_times;
    let thresholds = report.config.thresholds;

    let target_label = report.config.target.as_deref().map_or_else(
        || {
            let count = report.config.endpoints.as_ref().map_or(0, Vec::len);
            format!("{} endpoints", count)
        },
        str::to_owned,
    );

    let avg_class = if summary.avg_response_time_ms < thresholds.max_avg_response_time_ms as f64 {
        "good"
    } else {
        "bad"
    };
    let error_class = if summary.error_rate < thresholds.max_error_rate {
        "good"
    } else {
        "bad"
    };
    let run_label = if summary.completed_successfully {
        "complete"
    } else {
        "partial"
    };

    let interruption_banner = report.interruption_reason.as_ref().map_or_else(
        String::new,
        |reason| {
            format!(
                "<div class=\"banner\">Campaign interrupted: {}</div>",
                html_escape(reason)
            )
        },
    );

    let endpoint_header = if multi { "<th>Endpoint</th>" } else { "" };
    let wave_rows: String = report
        .waves
        .iter()
        .map(|wave| {
            let endpoint_cell = if multi {
                format!(
                    "<td>{}</td>",
                    html_escape(wave.endpoint.as_deref().unwrap_or("-"))
                )
            } else {
                String::new()
            };
            format!(
                "<tr>{}<td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td>{:.2}%</td><td>{:.2}</td><td>{}</td></tr>",
                endpoint_cell,
                wave.wave_number,
                wave.concurrency,
                wave.total_requests,
                wave.successful_requests,
                wave.failed_requests,
                wave.error_rate * 100.0,
                wave.avg_response_time_ms,
                wave.duration_ms,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let level_rows: String = report
        .by_concurrency
        .iter()
        .map(|(concurrency, level)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td>{:.2}%</td><td>{:.2}</td><td>{}</td></tr>",
                concurrency,
                level.total_requests,
                level.successful_requests,
                level.failed_requests,
                level.error_rate * 100.0,
                level.avg_response_time_ms,
                level.total_duration_ms,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let endpoint_section = report.endpoints.as_ref().map_or_else(
        String::new,
        |entries| {
            let rows: String = entries
                .iter()
                .map(|endpoint| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                         <td>{:.2}%</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
                        html_escape(&endpoint.name),
                        html_escape(&endpoint.url),
                        endpoint.total_requests,
                        endpoint.successful_requests,
                        endpoint.failed_requests,
                        endpoint.error_rate * 100.0,
                        endpoint.avg_response_time_ms,
                        endpoint.response_times.p50_ms,
                        endpoint.response_times.p95_ms,
                        endpoint.response_times.p99_ms,
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "<h2>Endpoints</h2>\n<table>\n  <thead>\n    <tr>\n      \
                 <th>Name</th><th>URL</th><th>Requests</th><th>OK</th><th>Failed</th>\
                 <th>Error Rate</th><th>Avg (ms)</th><th>P50</th><th>P95</th><th>P99</th>\n    \
                 </tr>\n  </thead>\n  <tbody>\n{}\n  </tbody>\n</table>",
                rows
            )
        },
    );

    let charts_section = charts.map_or_else(String::new, |set| {
        format!(
            "<h2>Charts</h2>\n<div class=\"chart\">{}</div>\n<div class=\"chart\">{}</div>",
            set.avg_response, set.error_rate
        )
    });

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>wavecheck Report - {target}</title>
<style>
  *, *::before, *::after {{ box-sizing: border-box; }}
  body {{
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    margin: 0; padding: 2rem;
    background: #111827; color: #e5e7eb;
    line-height: 1.5;
  }}
  h1 {{ font-size: 1.75rem; font-weight: 700; color: #f9fafb; margin: 0 0 0.25rem; }}
  h2 {{ font-size: 1.125rem; font-weight: 600; color: #9ca3af;
        text-transform: uppercase; letter-spacing: 0.05em;
        margin: 2rem 0 0.75rem; border-bottom: 1px solid #1f2937; padding-bottom: 0.5rem; }}
  .meta {{ color: #6b7280; font-size: 0.875rem; margin-bottom: 1.5rem; }}
  .meta span {{ margin-right: 1.5rem; }}
  .banner {{
    background: #7f1d1d; border: 1px solid #b91c1c; color: #fecaca;
    border-radius: 0.5rem; padding: 0.75rem 1rem; margin-bottom: 1.5rem;
  }}
  .stats-grid {{
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(170px, 1fr));
    gap: 1rem; margin-bottom: 2rem;
  }}
  .stat-card {{
    background: #1f2937; border: 1px solid #374151;
    border-radius: 0.5rem; padding: 1rem 1.25rem;
  }}
  .stat-card .label {{
    font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.05em;
    color: #6b7280; margin-bottom: 0.25rem;
  }}
  .stat-card .value {{ font-size: 1.5rem; font-weight: 700; color: #f9fafb; }}
  .stat-card .unit {{ font-size: 0.875rem; color: #9ca3af; margin-left: 0.2rem; }}
  .stat-card.good .value {{ color: #34d399; }}
  .stat-card.bad .value {{ color: #f87171; }}
  table {{
    width: 100%; border-collapse: collapse; font-size: 0.8125rem;
    background: #1f2937; border-radius: 0.5rem; overflow: hidden;
    margin-bottom: 2rem;
  }}
  thead {{ background: #111827; }}
  th {{
    padding: 0.625rem 0.875rem; text-align: left;
    font-weight: 600; color: #9ca3af;
    text-transform: uppercase; letter-spacing: 0.04em;
    font-size: 0.75rem;
  }}
  td {{ padding: 0.5rem 0.875rem; border-top: 1px solid #374151; color: #d1d5db; }}
  tr:hover td {{ background: #273449; }}
  .chart {{
    background: #ffffff; border-radius: 0.5rem; overflow: hidden;
    margin-bottom: 1.5rem; padding: 0.5rem;
  }}
  .chart svg {{ max-width: 100%; height: auto; display: block; }}
  footer {{
    margin-top: 3rem; padding-top: 1rem; border-top: 1px solid #1f2937;
    color: #4b5563; font-size: 0.8125rem;
  }}
</style>
</head>
<body>
<h1>Load Campaign Report</h1>
<div class="meta">
  <span>Target: {target}</span>
  <span>Generated: {timestamp}</span>
  <span>Run: {run_label}</span>
</div>
{interruption_banner}

<h2>Summary</h2>
<div class="stats-grid">
  <div class="stat-card">
    <div class="label">Total Requests</div>
    <div class="value">{total_requests}</div>
  </div>
  <div class="stat-card">
    <div class="label">Successful</div>
    <div class="value">{successful_requests}</div>
  </div>
  <div class="stat-card">
    <div class="label">Failed</div>
    <div class="value">{failed_requests}</div>
  </div>
  <div class="stat-card {error_class}">
    <div class="label">Error Rate</div>
    <div class="value">{error_rate:.2}<span class="unit">%</span></div>
  </div>
  <div class="stat-card {avg_class}">
    <div class="label">Avg Response</div>
    <div class="value">{avg:.2}<span class="unit">ms</span></div>
  </div>
  <div class="stat-card">
    <div class="label">Min / Max</div>
    <div class="value">{min} / {max}<span class="unit">ms</span></div>
  </div>
  <div class="stat-card">
    <div class="label">P50</div>
    <div class="value">{p50:.2}<span class="unit">ms</span></div>
  </div>
  <div class="stat-card">
    <div class="label">P90</div>
    <div class="value">{p90:.2}<span class="unit">ms</span></div>
  </div>
  <div class="stat-card">
    <div class="label">P95</div>
    <div class="value">{p95:.2}<span class="unit">ms</span></div>
  </div>
  <div class="stat-card">
    <div class="label">P99</div>
    <div class="value">{p99:.2}<span class="unit">ms</span></div>
  </div>
  <div class="stat-card">
    <div class="label">Total Duration</div>
    <div class="value">{total_duration}<span class="unit">ms</span></div>
  </div>
</div>
{charts_section}

<h2>Waves</h2>
<table>
  <thead>
    <tr>
      {endpoint_header}<th>#</th><th>Users</th><th>Requests</th><th>OK</th>
      <th>Failed</th><th>Error Rate</th><th>Avg (ms)</th><th>Duration (ms)</th>
    </tr>
  </thead>
  <tbody>
{wave_rows}
  </tbody>
</table>

<h2>By Concurrency</h2>
<table>
  <thead>
    <tr>
      <th>Users</th><th>Requests</th><th>OK</th><th>Failed</th>
      <th>Error Rate</th><th>Avg (ms)</th><th>Total Duration (ms)</th>
    </tr>
  </thead>
  <tbody>
{level_rows}
  </tbody>
</table>
{endpoint_section}

<footer>Generated by wavecheck {version} &bull; {timestamp}</footer>
</body>
</html>
"#,
        target = html_escape(&target_label),
        timestamp = html_escape(&report.timestamp),
        run_label = run_label,
        interruption_banner = interruption_banner,
        total_requests = summary.total_requests,
        successful_requests = summary.successful_requests,
        failed_requests = summary.failed_requests,
        error_rate = summary.error_rate * 100.0,
        error_class = error_class,
        avg = summary.avg_response_time_ms,
        avg_class = avg_class,
        min = times.min_ms,
        max = times.max_ms,
        p50 = times.p50_ms,
        p90 = times.p90_ms,
        p95 = times.p95_ms,
        p99 = times.p99_ms,
        total_duration = summary.total_duration_ms,
        charts_section = charts_section,
        endpoint_header = endpoint_header,
        wave_rows = wave_rows,
        level_rows = level_rows,
        endpoint_section = endpoint_section,
        version = env!("CARGO_PKG_VERSION"),
    )
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
