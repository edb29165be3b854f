//! # atelier-entity
//!
//! Domain entity models for Atelier. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.
//!
//! The gallery hierarchy engine (tree building, flattening, ancestor
//! walks, cycle checks, cascade planning) lives next to the `Gallery`
//! model in [`gallery`]. It is pure: every function works over an
//! in-memory snapshot of all galleries and never touches the database.

pub mod artwork;
pub mod gallery;
pub mod password;

pub use artwork::{ArtworkImage, ArtworkPost};
pub use gallery::{Gallery, GalleryNode};
pub use password::Protected;
