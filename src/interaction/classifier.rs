//! Request classification: prompt the model, then parse and validate its reply.

use tracing::{debug, info, instrument, warn};

use crate::{
    base::{
        error::ClassifyError,
        prompts::build_classification_prompt,
        types::{Category, ClassificationReply},
    },
    service::llm::LlmClient,
};

/// Classify one support request.
///
/// Errors are returned as-is; the caller decides how to surface them.
#[instrument(skip(llm, directive), fields(issue_len = issue.len()))]
pub async fn classify_issue(llm: &LlmClient, directive: &str, issue: &str) -> Result<Category, ClassifyError> {
    let prompt = build_classification_prompt(directive, issue);

    let raw = llm.get_classification_response(&prompt).await?;
    debug!("Raw classification reply: {raw}");

    match parse_classification(&raw) {
        Ok(category) => {
            info!("Request classified as `{category}`.");
            Ok(category)
        }
        Err(err) => {
            warn!("Rejected classification reply: {err}");
            Err(err)
        }
    }
}

/// Parse a raw `{"category": "..."}` reply into a [`Category`].
///
/// When the reply contains a Markdown code fence, only the first fenced block is parsed.  Anything that is not an object
/// with a string `category` field is a [`ClassifyError::SchemaViolation`]; a label outside
/// the known set is a [`ClassifyError::CategoryMismatch`].
pub fn parse_classification(raw: &str) -> Result<Category, ClassifyError> {
    let body = strip_code_fence(raw.trim());

    let reply: ClassificationReply = serde_json::from_str(body).map_err(|err| ClassifyError::SchemaViolation(format!("{err} in reply {raw:?}")))?;

    reply.category.parse()
}

/// Body of the first fenced block in `text`, or `text` itself when there is none.
///
/// The fence may follow other prose, and the body may start on the opening line.
fn strip_code_fence(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text;
    };

    // Drop the info string (e.g., `json`) right after the opening fence.
    let rest = text[start + 3..].trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    let body = rest.find("```").map_or(rest, |end| &rest[..end]);

    body.trim()
}
