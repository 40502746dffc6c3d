//! Shared foundation for scribe: configuration, errors, IDs, pagination.

pub mod config;
pub mod error;
pub mod id;
pub mod pagination;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use pagination::{Page, Paginator};
