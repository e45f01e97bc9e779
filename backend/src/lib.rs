//! # MINT Rust Backend
//!
//! Malaria intervention scenario service backed by an external emulator.
//!
//! A client submits one intervention request. The backend expands it into a
//! fixed, ordered set of scenarios (baseline plus one per intervention
//! variant), submits them to the emulator as a single columnar batch and
//! reconciles the emulator's flat prevalence and cases tables into
//! per-scenario time series.
//!
//! ## Architecture
//!
//! - [`models`]: request, scenario, result and form-option types
//! - [`services`]: scenario building, batch encoding, reconciliation,
//!   compare-parameter resolution and the end-to-end pipeline
//! - [`emulator`]: the emulator boundary and its process adapter
//! - [`config`]: TOML configuration with environment overrides
//! - [`api`]: DTOs exchanged with clients
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod emulator;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{ServiceError, ServiceResult};
