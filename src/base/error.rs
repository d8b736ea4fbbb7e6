//! Domain error kinds for classification and ticket confirmation.
//!
//! Application plumbing uses [`anyhow`] through [`Res`](super::types::Res); these
//! types exist where the caller has to tell failure modes apart.

use thiserror::Error;

/// Errors on the classification path.
///
/// All of these are recoverable: the session renders them as a single error notice and
/// goes back to waiting for an issue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// The model service could not be reached, timed out, rejected the request, or is
    /// not configured.
    #[error("Classification service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The model replied, but not with a `{"category": "..."}` object.
    #[error("Classification reply did not match the expected schema: {0}")]
    SchemaViolation(String),

    /// The reply was well formed, but the category is not one we know.
    #[error("Classification returned an unknown category: {0:?}")]
    CategoryMismatch(String),
}

/// Rejected ticket confirmation: one or both contact fields are blank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please enter both Name and Phone Number.")]
pub struct ValidationError {
    /// The name was empty after trimming.
    pub missing_name: bool,
    /// The phone number was empty after trimming.
    pub missing_phone: bool,
}
