//! Core components, types, and utilities for the support-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Classification prompts and sample questions.
//! - Common types, domain errors, and result handling.

pub mod config;
pub mod error;
pub mod prompts;
pub mod types;
