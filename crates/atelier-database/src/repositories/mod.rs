//! Repository implementations for Atelier entities.

pub mod artwork;
pub mod gallery;

pub use artwork::ArtworkRepository;
pub use gallery::{CascadeOutcome, GalleryRepository, subtree_ids};
