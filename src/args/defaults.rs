pub(crate) const DEFAULT_USER_AGENT: &str = concat!("wavecheck/", env!("CARGO_PKG_VERSION"));

/// Concurrency levels used when neither the CLI nor a config file sets any.
pub(crate) const DEFAULT_CONCURRENT_USERS: [usize; 3] = [20, 50, 100];

pub(crate) fn default_reports_path() -> String {
    "reports".to_owned()
}
