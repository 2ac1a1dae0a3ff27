use reqwest::{Client, redirect};

use crate::args::{CampaignArgs, DEFAULT_USER_AGENT};
use crate::error::{AppError, AppResult, HttpError};

/// Builds the client every wave of the campaign fans out through.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client(args: &CampaignArgs) -> AppResult<Client> {
    let mut builder = Client::builder()
        .timeout(args.request_timeout)
        .connect_timeout(args.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .redirect(redirect::Policy::limited(10));

    if args.insecure {
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    builder
        .build()
        .map_err(|source| AppError::http(HttpError::BuildClientFailed { source }))
}
