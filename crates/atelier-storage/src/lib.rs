//! # atelier-storage
//!
//! Object storage for artwork images. The local filesystem provider is
//! the only backend; [`MediaStore`] binds a provider to the public URL
//! scheme images are served under.

pub mod media;
pub mod providers;

pub use media::MediaStore;
pub use providers::local::LocalStorageProvider;
