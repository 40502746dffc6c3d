//! Core business logic for scribe.

pub mod services;

pub use services::*;
