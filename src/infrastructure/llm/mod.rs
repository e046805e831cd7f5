//! Completion clients for CI log triage.

pub mod openrouter;

pub use openrouter::{OpenRouterClient, OpenRouterSettings};
