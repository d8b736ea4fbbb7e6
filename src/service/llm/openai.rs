//! Thin wrapper around async-openai for classification calls.
//!
//! Uses the Responses API with a strict JSON schema text format, so a well-behaved
//! model replies with exactly `{"category": "<label>"}`.

use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use async_openai::{
    Client,
    config::OpenAIConfig,
    types::responses::{
        Content, CreateResponseArgs, Input, InputItem, InputMessageArgs, OutputContent, Response, ResponseFormatJsonSchema, Role, TextConfig, TextResponseFormat,
    },
};
use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::base::{config::Config, error::ClassifyError, prompts};

use super::{GenericLlmClient, LlmClient};

const RETRY_DELAY_MS: u64 = 1000;

// Extra methods on `LlmClient` applied by the openai implementation.

impl LlmClient {
    pub fn openai(config: &Config) -> Self {
        let client = OpenAiLlmClient::new(config);
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// OpenAI LLM client implementation.
#[derive(Clone)]
pub struct OpenAiLlmClient {
    client: Client<OpenAIConfig>,
    config: Config,
}

impl OpenAiLlmClient {
    /// Create a new OpenAI LLM client.
    #[instrument(name = "OpenAiLlmClient::new", skip_all)]
    pub fn new(config: &Config) -> Self {
        let mut cfg = OpenAIConfig::new().with_api_key(config.openai_api_key.clone());

        if let Some(api_base) = &config.openai_api_base {
            info!("Using OpenAI API base `{api_base}`.");
            cfg = cfg.with_api_base(api_base);
        }

        Self {
            client: Client::with_config(cfg),
            config: config.clone(),
        }
    }

    /// Build the classification input.
    fn build_classification_input(&self, prompt: &str) -> Result<Input, ClassifyError> {
        Ok(Input::Items(vec![InputItem::Message(
            InputMessageArgs::default()
                .role(Role::User)
                .content(prompt.to_string())
                .build()
                .map_err(|err| ClassifyError::ServiceUnavailable(format!("Invalid OpenAI request: {err}")))?,
        )]))
    }

    /// Helper function to make OpenAI API calls with retry logic and timeout handling.
    async fn call_openai_api(&self, request_builder: CreateResponseArgs) -> Result<Response, ClassifyError> {
        let max_retries = self.config.openai_max_retries;
        let deadline = Duration::from_secs(self.config.openai_timeout_secs);

        let mut retries = 0;

        loop {
            let request = request_builder
                .build()
                .map_err(|err| ClassifyError::ServiceUnavailable(format!("Invalid OpenAI request: {err}")))?;
            let result = timeout(deadline, self.client.responses().create(request)).await;

            let failure = match result {
                Ok(Ok(response)) => {
                    info!("OpenAI API call succeeded after {} attempts", retries + 1);
                    return Ok(response);
                }
                Ok(Err(err)) => format!("OpenAI API call failed: {err}"),
                Err(_) => format!("OpenAI API call timed out after {}s", deadline.as_secs()),
            };

            if retries >= max_retries {
                return Err(ClassifyError::ServiceUnavailable(format!("{failure} (after {} attempts)", retries + 1)));
            }

            retries += 1;
            warn!("{failure}, retrying {retries}/{max_retries}");

            // Exponential backoff.
            let delay = Duration::from_millis(RETRY_DELAY_MS * 2_u64.pow(retries - 1));
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl GenericLlmClient for OpenAiLlmClient {
    #[instrument(name = "OpenAiLlmClient::get_classification_response", skip_all, fields(model = %self.config.openai_model))]
    async fn get_classification_response(&self, prompt: &str) -> Result<String, ClassifyError> {
        if self.config.openai_api_key.trim().is_empty() {
            return Err(ClassifyError::ServiceUnavailable(
                "OpenAI API key is not configured; set `OPENAI_API_KEY` (or `SUPPORT_BOT_OPENAI_API_KEY`).".to_string(),
            ));
        }

        let input = self.build_classification_input(prompt)?;

        let mut request = CreateResponseArgs::default();
        request
            .max_output_tokens(self.config.openai_max_tokens)
            .model(&self.config.openai_model)
            .text(get_openai_text_config().clone())
            .input(input);

        // Reasoning models (`o*`) reject a sampling temperature.
        if !self.config.openai_model.starts_with('o') {
            request.temperature(self.config.openai_temperature);
        }

        let response = self.call_openai_api(request).await?;

        parse_openai_response(&response)
    }
}

/// Extract the reply text from an OpenAI response.
///
/// A refusal, or a reply with no text at all, is a schema violation.
#[instrument(skip_all)]
pub fn parse_openai_response(response: &Response) -> Result<String, ClassifyError> {
    let mut texts = Vec::new();

    debug!("LLM response has {} outputs.", response.output.len());
    for output in &response.output {
        match output {
            OutputContent::Message(message) => {
                for message_content in &message.content {
                    match message_content {
                        Content::OutputText(text) => texts.push(text.text.clone()),
                        Content::Refusal(reason) => {
                            return Err(ClassifyError::SchemaViolation(format!("Request refused: {}", reason.refusal)));
                        }
                    }
                }
            }
            _ => {
                warn!("Unexpected output: {output:?}");
            }
        }
    }

    if texts.is_empty() {
        return Err(ClassifyError::SchemaViolation("The model returned no text.".to_string()));
    }

    Ok(texts.join(""))
}

// Statics.

static OPENAI_TEXT_CONFIG: OnceLock<TextConfig> = OnceLock::new();

fn get_openai_text_config() -> &'static TextConfig {
    OPENAI_TEXT_CONFIG.get_or_init(|| TextConfig {
        format: TextResponseFormat::JsonSchema(ResponseFormatJsonSchema {
            name: "SupportTicketClassification".to_string(),
            description: Some("Classified support category.".to_string()),
            schema: Some(prompts::classification_schema()),
            strict: Some(true),
        }),
    })
}

// Tests.
