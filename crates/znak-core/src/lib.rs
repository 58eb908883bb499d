//! # Znak Core
//!
//! The domain layer of the Znak document submission client.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod submitter;

pub use error::SubmitError;
pub use submitter::DocumentSubmitter;
