//! Support request handling for support-bot.
//!
//! This module provides the request/response flow of a support session:
//! - Classifying a request through the LLM service
//! - Mapping the category to a reply
//! - Collecting contact details through the ticket state machine
//! - Driving the whole session against a form surface

pub mod classifier;
pub mod desk;
pub mod responder;
pub mod session;
