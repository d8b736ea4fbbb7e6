//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, path::Path, sync::Arc};

use serde::Deserialize;
use tracing::warn;

use crate::base::prompts;

use super::types::Res;

/// Default OpenAI model to use
fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

/// Default sampling temperature for the classifier
fn default_openai_temperature() -> f32 {
    0.0
}

/// Default max output tokens for OpenAI model
fn default_openai_max_tokens() -> u32 {
    256
}

/// Default per-attempt deadline for OpenAI calls
fn default_openai_timeout_secs() -> u64 {
    30
}

/// Default number of retries after a failed OpenAI call
fn default_openai_max_retries() -> u32 {
    2
}

/// Default classification directive.
fn default_classification_directive() -> String {
    prompts::CLASSIFICATION_DIRECTIVE.to_string()
}

/// Configuration for the support-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Configuration values, see [`Config::load`] for sources.
#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// OpenAI API key (`OPENAI_API_KEY`).
    ///
    /// May be empty at start-up; classification then fails with a clear error.
    #[serde(default)]
    pub openai_api_key: String,
    /// Alternate OpenAI-compatible API base URL (`OPENAI_API_BASE`).
    #[serde(default)]
    pub openai_api_base: Option<String>,
    /// OpenAI model to use (`OPENAI_MODEL`).
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Sampling temperature to use for the classifier (`OPENAI_TEMPERATURE`).
    /// Value between 0 and 2.  Classification wants this at 0 for reproducibility.
    #[serde(default = "default_openai_temperature")]
    pub openai_temperature: f32,
    /// Max output tokens for OpenAI model (`OPENAI_MAX_TOKENS`).
    #[serde(default = "default_openai_max_tokens")]
    pub openai_max_tokens: u32,
    /// Deadline for a single OpenAI call, in seconds (`OPENAI_TIMEOUT_SECS`).
    #[serde(default = "default_openai_timeout_secs")]
    pub openai_timeout_secs: u64,
    /// Retries after a failed or timed out OpenAI call (`OPENAI_MAX_RETRIES`).
    #[serde(default = "default_openai_max_retries")]
    pub openai_max_retries: u32,
    /// Optional custom classification directive (`SUPPORT_BOT_CLASSIFICATION_DIRECTIVE`).
    #[serde(default = "default_classification_directive")]
    pub classification_directive: String,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_api_base: None,
            openai_model: default_openai_model(),
            openai_temperature: default_openai_temperature(),
            openai_max_tokens: default_openai_max_tokens(),
            openai_timeout_secs: default_openai_timeout_secs(),
            openai_max_retries: default_openai_max_retries(),
            classification_directive: default_classification_directive(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { inner: Arc::new(ConfigInner::default()) }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// Sources, lowest precedence first: the config file (explicit, or `.hidden/config.toml`
    /// when present), `OPENAI_*` environment variables, `SUPPORT_BOT_*` environment variables.
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        Self::load_with_env(explicit_path, None)
    }

    /// Load the configuration, reading variables from `env` instead of the process
    /// environment when it is given.
    fn load_with_env(explicit_path: Option<&Path>, env: Option<config::Map<String, String>>) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        cfg = cfg
            .add_source(config::Environment::default().prefix("OPENAI").keep_prefix(true).source(env.clone()))
            .add_source(config::Environment::default().prefix("SUPPORT_BOT").source(env));

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        if result.openai_api_key.trim().is_empty() {
            warn!("No OpenAI API key configured; set `OPENAI_API_KEY` to enable classification.");
        }

        Ok(result)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Res<()> {
        if !(0.0..=2.0).contains(&self.openai_temperature) {
            return Err(anyhow::anyhow!("OpenAI temperature must be between 0 and 2."));
        }

        if self.openai_max_tokens < 1 || self.openai_max_tokens > 128000 {
            return Err(anyhow::anyhow!("OpenAI max tokens must be between 1 and 128000."));
        }

        if self.openai_timeout_secs < 1 {
            return Err(anyhow::anyhow!("OpenAI timeout must be at least 1 second."));
        }

        if self.openai_max_retries > 10 {
            return Err(anyhow::anyhow!("OpenAI max retries must be at most 10."));
        }

        Ok(())
    }
}

/// Load a `.env` file into the process environment.
///
/// Reads `path`, or searches the current directory and its parents when `path` is `None`.
/// Returns `Ok(false)` when there is no such file.  A file that exists but cannot be read
/// or parsed is an error.
pub fn load_env_file(path: Option<&Path>) -> Res<bool> {
    let result = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    match result {
        Ok(()) => Ok(true),
        Err(err) if err.not_found() => Ok(false),
        Err(err) => Err(anyhow::anyhow!("Failed to load `.env` file: {err}")),
    }
}
