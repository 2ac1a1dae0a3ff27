use plotters::prelude::*;

use crate::error::AppResult;

use super::model::WaveEntry;

const CHART_SIZE: (u32, u32) = (900, 400);

/// Inline SVG documents embedded into the HTML report.
pub(crate) struct ReportCharts {
    pub(crate) avg_response: String,
    pub(crate) error_rate: String,
}

pub(crate) fn render_charts(waves: &[WaveEntry]) -> AppResult<ReportCharts> {
    Ok(ReportCharts {
        avg_response: render_avg_response_chart(waves)?,
        error_rate: render_error_rate_chart(waves)?,
    })
}

fn render_avg_response_chart(waves: &[WaveEntry]) -> AppResult<String> {
    let data: Vec<(u64, f64)> = waves
        .iter()
        .enumerate()
        .map(|(index, wave)| (index.saturating_add(1) as u64, wave.avg_response_time_ms))
        .collect();

    let x_max = waves.len().saturating_add(1) as u64;
    let y_max = data.iter().map(|&(_, avg)| avg).fold(1.0_f64, f64::max) * 1.1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Average Response Time per Wave", ("sans-serif", 30).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0u64..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Wave")
            .y_desc("Avg Response Time (ms)")
            .x_labels(20)
            .y_labels(10)
            .draw()?;

        chart.draw_series(LineSeries::new(data.into_iter(), &BLUE))?;

        root.present()?;
    }
    Ok(svg)
}

fn render_error_rate_chart(waves: &[WaveEntry]) -> AppResult<String> {
    let data: Vec<(u64, f64)> = waves
        .iter()
        .enumerate()
        .map(|(index, wave)| (index.saturating_add(1) as u64, wave.error_rate * 100.0))
        .collect();

    let x_max = waves.len().saturating_add(1) as u64;
    let max_pct = data.iter().map(|&(_, pct)| pct).fold(0.0_f64, f64::max);
    let y_max = (max_pct * 1.2).clamp(5.0, 100.0);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Error Rate per Wave", ("sans-serif", 30).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0u64..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Wave")
            .y_desc("Error Rate (%)")
            .x_labels(20)
            .y_labels(10)
            .draw()?;

        chart.draw_series(LineSeries::new(data.into_iter(), &RED))?;

        root.present()?;
    }
    Ok(svg)
}
