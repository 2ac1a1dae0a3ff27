use chrono::{Datelike, Local, Timelike};

/// Timestamped stem shared by the JSON and HTML artifacts of one emission,
/// e.g. `wave_report_2026-08-22_14-03-59`. Uses local wall-clock time.
#[must_use]
pub fn report_base_name() -> String {
    let now = Local::now();
    format!(
        "wave_report_{:04}-{:02}-{:02}_{:02}-{:02}-{:02}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}
