//! Gallery browsing and administration.

pub mod service;

pub use service::{CreateGalleryRequest, GalleryService, UpdateGalleryRequest};
