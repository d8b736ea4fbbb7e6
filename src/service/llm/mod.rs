//! Integration with Large Language Model services.
//!
//! The module defines the `GenericLlmClient` trait that can be implemented
//! for different LLM providers, with a default implementation for OpenAI.

pub mod openai;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::error::ClassifyError;

// Traits.

/// Generic LLM client trait that clients must implement.
///
/// Implementing this trait allows different LLM providers to be used with the support-bot.
#[async_trait]
pub trait GenericLlmClient: Send + Sync + 'static {
    /// Send a fully built classification prompt and return the raw reply text.
    ///
    /// Implementations ask the model for the `{"category": "..."}` structure, but do not
    /// parse it: that is the classifier's job.  Transport, timeout, and credential
    /// problems are reported as [`ClassifyError::ServiceUnavailable`].
    async fn get_classification_response(&self, prompt: &str) -> Result<String, ClassifyError>;
}

// Structs.

/// LLM client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct LlmClient {
    inner: Arc<dyn GenericLlmClient>,
}

impl Deref for LlmClient {
    type Target = dyn GenericLlmClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl LlmClient {
    pub fn new(inner: Arc<dyn GenericLlmClient>) -> Self {
        Self { inner }
    }
}
