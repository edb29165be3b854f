//! Core type definitions used across the Atelier workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
