//! Application layer services implementing business logic.
//!
//! Services consume repository and client traits from [`crate::domain`] and
//! expose a small API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Code allocation and resolution
//! - [`services::availability::AvailabilityChecker`] - Code and target lookups
//! - [`services::triage_service::TriageService`] - CI log analysis via a completion model

pub mod services;
