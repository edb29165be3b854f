//! Gallery domain entities and the hierarchy engine.

pub mod hierarchy;
pub mod model;
pub mod tree;

pub use hierarchy::{
    ancestor_ids, ancestors, gallery_path, plan_cascade_delete, would_create_circular_reference,
};
pub use model::{CreateGallery, Gallery, MAX_GALLERY_NAME_LEN, UpdateGallery, sort_galleries};
pub use tree::{FlatGallery, GalleryNode, build_gallery_tree, flatten_gallery_tree};
