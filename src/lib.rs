//! Core library for the `wavecheck` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, configuration parsing, request execution, wave and
//! campaign orchestration, metrics aggregation, and report emission. The
//! primary user-facing interface is the `wavecheck` command-line
//! application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod campaign;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod shutdown;
