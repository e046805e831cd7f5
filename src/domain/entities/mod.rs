//! Core domain entities.
//!
//! Entities are plain data structures without business logic. Records that
//! the store creates have a separate input struct (`NewShortUrl`) that omits
//! the store-assigned fields.
//!
//! - [`ShortUrl`] - A code → target URL mapping
//! - [`TriageRequest`] / [`TriageReport`] - CI log triage input and result

pub mod short_url;
pub mod triage;

pub use short_url::{NewShortUrl, ShortUrl};
pub use triage::{CiProvider, FailureClassification, TriageReport, TriageRequest};
