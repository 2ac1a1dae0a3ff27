use std::time::Instant;

use futures_util::StreamExt;
use reqwest::{Client, Response};
use tracing::debug;

use crate::metrics::RequestOutcome;

/// Issues one GET and classifies whatever happens as a [`RequestOutcome`].
/// Transport failures, timeouts and non-2xx statuses are recorded as data;
/// the returned timing covers dispatch to full body drain, or to the
/// failure point.
pub async fn execute_request(client: &Client, id: String, url: &str) -> RequestOutcome {
    let start = Instant::now();
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            match drain_response_body(response).await {
                Ok(()) => RequestOutcome::completed(id, status, elapsed_ms(start)),
                Err(err) => {
                    let elapsed = elapsed_ms(start);
                    debug!("Request {} failed while reading the body: {}", id, err);
                    RequestOutcome::failed(id, elapsed, describe_error(&err))
                }
            }
        }
        Err(err) => {
            let elapsed = elapsed_ms(start);
            debug!("Request {} failed: {}", id, err);
            RequestOutcome::failed(id, elapsed, describe_error(&err))
        }
    }
}

fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Request timeout".to_owned()
    } else {
        err.to_string()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}

async fn drain_response_body(response: Response) -> Result<(), reqwest::Error> {
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        drop(chunk?);
    }
    Ok(())
}
