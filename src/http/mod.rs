//! HTTP client construction and single-request execution.

mod client;
mod request;


pub use client::build_client;
pub use request::execute_request;
