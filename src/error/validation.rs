use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid ratio '{value}'. Expected a number between 0 and 1.")]
    InvalidRatio { value: String },
    #[error("Invalid endpoint '{value}'. Expected 'name=url'.")]
    InvalidEndpointFormat { value: String },
    #[error("Invalid endpoint '{value}'. Name must not be empty.")]
    EndpointNameEmpty { value: String },
    #[error("Duplicate endpoint name '{name}'.")]
    DuplicateEndpointName { name: String },
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL '{url}' is missing a host.")]
    UrlMissingHost { url: String },
    #[error("Missing target (set --url or --endpoint, or provide one in config).")]
    MissingTarget,
    #[error("Set either a single url or a list of endpoints, not both.")]
    TargetConflict,
    #[error("Campaign interrupted: {reason}")]
    CampaignInterrupted { reason: String },
    #[error("Thresholds breached: {details}")]
    ThresholdsBreached { details: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
