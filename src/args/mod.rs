//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use cli::CampaignArgs;
pub use types::{EndpointSpec, PositiveU64, PositiveUsize};

pub(crate) use defaults::DEFAULT_USER_AGENT;
