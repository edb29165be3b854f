//! # atelier-api
//!
//! HTTP API layer for Atelier built on Axum.
//!
//! Provides the public gallery and artwork endpoints, the admin
//! endpoints behind a bearer token, media serving, middleware (CORS,
//! logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
