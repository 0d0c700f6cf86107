//! `vidaio` library crate.
//!
//! Exposes the CLI definition, configuration and pipeline for integration
//! testing. The binary entrypoint lives in `main.rs`.

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
