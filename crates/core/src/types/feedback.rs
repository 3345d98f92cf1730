//! Feedback submission types.

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a [`FeedbackForm`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    /// One or more required fields are missing or blank.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Feedback form body exactly as the browser sends it.
///
/// Every field is optional here so that a missing field surfaces as a
/// [`FeedbackError`] instead of a deserialization failure. Unknown fields
/// (the form also posts a `password` field) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackForm {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_message: Option<String>,
}

/// A validated feedback submission.
///
/// ## Constraints
///
/// - `user_name` and `user_message` are non-empty after trimming
/// - `user_email` is `None` when absent or blank
///
/// ## Examples
///
/// ```
/// use feedback_relay_core::{FeedbackForm, FeedbackSubmission};
///
/// let form = FeedbackForm {
///     user_name: Some("Ann Lee".to_string()),
///     user_email: Some("  ".to_string()),
///     user_message: Some("Great job".to_string()),
/// };
///
/// let submission = FeedbackSubmission::try_from(form).unwrap();
/// assert_eq!(submission.user_name(), "Ann Lee");
/// assert_eq!(submission.user_email(), None);
///
/// assert!(FeedbackSubmission::try_from(FeedbackForm::default()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    user_name: String,
    user_email: Option<String>,
    user_message: String,
}

impl FeedbackSubmission {
    /// Validate raw field values into a submission.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::MissingFields`] naming every required field
    /// that is absent or blank.
    pub fn new(
        user_name: Option<&str>,
        user_email: Option<&str>,
        user_message: Option<&str>,
    ) -> Result<Self, FeedbackError> {
        let user_name = non_blank(user_name);
        let user_message = non_blank(user_message);

        match (user_name, user_message) {
            (Some(name), Some(message)) => Ok(Self {
                user_name: name.to_owned(),
                user_email: non_blank(user_email).map(str::to_owned),
                user_message: message.to_owned(),
            }),
            (name, message) => {
                let mut missing = Vec::with_capacity(2);
                if name.is_none() {
                    missing.push("userName");
                }
                if message.is_none() {
                    missing.push("userMessage");
                }
                Err(FeedbackError::MissingFields(missing))
            }
        }
    }

    /// The submitter's display name.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// The submitter's email address, if one was given.
    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    /// The feedback text.
    #[must_use]
    pub fn user_message(&self) -> &str {
        &self.user_message
    }
}

impl TryFrom<FeedbackForm> for FeedbackSubmission {
    type Error = FeedbackError;

    fn try_from(form: FeedbackForm) -> Result<Self, Self::Error> {
        Self::new(
            form.user_name.as_deref(),
            form.user_email.as_deref(),
            form.user_message.as_deref(),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
