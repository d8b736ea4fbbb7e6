//! Library root for `support-bot`.
//!
//! Support-bot is an OpenAI-powered support desk designed to:
//! - Classify free-text support requests into a fixed set of categories
//! - Acknowledge the request, or ask for more detail when it is unclear
//! - Collect a name and phone number to confirm a support ticket
//!
//! The bot talks to OpenAI for classification and to a form surface (a terminal, by
//! default) for interaction.  Both sit behind traits so either can be swapped out.

#[deny(missing_docs)]
pub mod base;
#[deny(missing_docs)]
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and runs one interactive support session:
/// - Creates the runtime context with the LLM client and form surface
/// - Runs the session loop until the user quits
pub async fn start(config: Config) -> Void {
    info!("Starting support-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config);

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
