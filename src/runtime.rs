//! Runtime services and shared state for the support-bot.

use tracing::instrument;

use crate::{
    base::{config::Config, types::Void},
    interaction::desk,
    service::{llm::LlmClient, surface::Surface},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the LLM client, form surface, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The LLM client instance.
    pub llm: LlmClient,
    /// The form surface instance.
    pub surface: Surface,
}

impl Runtime {
    /// Create a new runtime instance backed by OpenAI and the terminal.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Self {
        // Initialize the LLM client.
        let llm = LlmClient::openai(&config);

        // Initialize the terminal surface.
        let surface = Surface::terminal();

        Self { config, llm, surface }
    }

    /// Run one support session to completion.
    pub async fn start(&self) -> Void {
        desk::run_session(&self.config, &self.llm, &self.surface).await
    }
}
