//! Feedback Relay Core - Shared domain types.
//!
//! This crate provides the types shared by the feedback relay components:
//! - `server` - HTTP intake endpoint and Slack interaction webhook
//! - `cli` - Operator tools for checking configuration and posting test messages
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Feedback submissions and posted message handles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
