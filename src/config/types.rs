use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub endpoints: Option<Vec<EndpointEntry>>,
    pub users: Option<Vec<usize>>,
    pub waves: Option<usize>,
    pub time_between_waves: Option<DurationValue>,
    pub campaign_timeout: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub max_avg_response_time_ms: Option<u64>,
    pub max_error_rate: Option<f64>,
    pub reports_path: Option<String>,
    pub no_charts: Option<bool>,
    pub insecure: Option<bool>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointEntry {
    pub name: String,
    pub url: String,
}

/// Either bare seconds or a duration string such as "500ms" or "2m".
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, field: &str) -> AppResult<Duration> {
        let parsed = match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text),
        };
        parsed.map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: field.to_owned(),
                source: err,
            })
        })
    }
}
