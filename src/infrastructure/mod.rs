//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Short URL repositories (PostgreSQL and in-memory)
//! - [`llm`] - Completion client for CI log triage

pub mod llm;
pub mod persistence;
