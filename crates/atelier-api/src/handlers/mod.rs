//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod artwork;
pub mod gallery;
pub mod health;
pub mod media;
