//! OpenRouter chat-completion client for summarizing association records.
//!
//! Implements [`genelink_core::summary::Summarizer`] with degrade-not-fail
//! semantics: a model-side problem never reaches the caller as an error.

mod client;
mod reply;

pub use client::{ModelConfig, OpenRouterClient, DEFAULT_BASE_URL};
