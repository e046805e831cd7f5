//! Business logic services for the application layer.

pub mod availability;
pub mod shortener_service;
pub mod triage_service;

pub use availability::{AvailabilityChecker, IdentifierKind};
pub use shortener_service::{AllocationSettings, ShortenerService};
pub use triage_service::TriageService;
