//! Service integrations for external APIs and front ends.
//!
//! This module contains implementations for the services used by the support-bot:
//! - LLM services (e.g., OpenAI) for classification
//! - Form surfaces (e.g., a terminal) for user interaction
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod llm;
pub mod surface;
