//! Utility functions for code generation and error classification.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`db_error`] - Unique-violation detection for PostgreSQL errors
//! - [`url_validation`] - Target URL checks applied before allocation

pub mod code_generator;
pub mod db_error;
pub mod url_validation;
