//! Core types for the feedback relay.
//!
//! This module provides validated wrappers for the data that flows through
//! the relay.

pub mod feedback;
pub mod handle;

pub use feedback::{FeedbackError, FeedbackForm, FeedbackSubmission};
pub use handle::MessageHandle;
