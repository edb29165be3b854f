//! Admin handlers. Everything except login requires an `AdminUser`.

pub mod artwork;
pub mod auth;
pub mod gallery;
