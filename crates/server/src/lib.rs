//! Feedback Relay server library.
//!
//! Accepts feedback form submissions, posts them to a Slack channel as
//! Block Kit notifications, and rewrites a notification in place when
//! someone clicks its Acknowledge button.
//!
//! The library exposes the router and state so the binary, the CLI, and
//! the integration tests all build the same application.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod slack;
pub mod state;

#[cfg(test)]
mod test_support;

pub use routes::app;
pub use state::AppState;
