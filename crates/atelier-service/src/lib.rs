//! # atelier-service
//!
//! Business logic for Atelier. Services load a snapshot of all galleries,
//! run the pure hierarchy and protection engine over it, and return
//! public views. Nothing leaves this crate with a password hash attached.

pub mod access;
pub mod artwork;
pub mod context;
pub mod gallery;
pub mod validation;
pub mod view;

pub use access::{AccessService, VerifyOutcome};
pub use artwork::ArtworkService;
pub use context::AdminContext;
pub use gallery::GalleryService;
pub use view::{ArtworkView, GalleryDetail, GalleryView, Viewer};
