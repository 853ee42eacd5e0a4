//! Compliance scoring for charities.
//!
//! The [`scoring`] module holds the pure scoring engine. [`config`],
//! [`telemetry`], and [`error`] carry the ambient pieces shared by hosts that
//! expose the engine.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
