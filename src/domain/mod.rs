//! Domain layer containing business entities and contracts.
//!
//! The domain layer has no dependencies on the presentation layer. Repository
//! and client traits define contracts implemented by the infrastructure layer;
//! business rules live in [`crate::application::services`].
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`completion`] - External text-completion contract
//! - [`errors`] - Error kinds shared by the services

pub mod completion;
pub mod entities;
pub mod errors;
pub mod repositories;
