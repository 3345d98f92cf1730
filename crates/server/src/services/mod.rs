//! Business logic services for the feedback relay.
//!
//! # Services
//!
//! - `feedback` - Format and post feedback notifications
//! - `acknowledgment` - Process Acknowledge button clicks

pub mod acknowledgment;
pub mod feedback;

pub use acknowledgment::{AcknowledgmentService, InteractionOutcome, parse_interaction_body};
pub use feedback::FeedbackService;
