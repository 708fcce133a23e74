//! HTTP integration tests.
//!
//! Starts the axum application on an ephemeral port and drives it with reqwest.

#![cfg(feature = "http")]

mod support;
mod api;
mod analytics;
