//! Artwork browsing and administration.

pub mod service;

pub use service::{ArtworkService, CreateArtworkRequest, UpdateArtworkRequest};
