//! Password protection inheritance.
//!
//! Rules:
//! - A gallery's own password governs it and every descendant that does
//!   not set one of its own.
//! - The nearest password on the ancestor chain wins.
//! - An artwork's own password governs it; otherwise it follows its
//!   gallery, and an artwork outside any gallery is public.
//! - Unlocking a gallery implicitly unlocks the descendants it governs,
//!   never a descendant (or artwork) with a password of its own.

pub mod resolver;

pub use resolver::{
    ProtectionIndex, effective_password, effective_password_for_post,
    is_gallery_password_protected, is_post_password_protected, password_source,
};
