//! Artwork domain entities.

pub mod image;
pub mod model;

pub use image::{ArtworkImage, NewArtworkImage, PreviewCandidate, sort_images};
pub use model::{ArtworkPost, CreateArtwork, MAX_ARTWORK_TITLE_LEN, UpdateArtwork, sort_artworks};
