//! # atelier-core
//!
//! Core crate for Atelier. Contains configuration schemas, pagination
//! types, the object storage trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Atelier crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
