//! Custom Axum extractors.

pub mod auth;
pub mod pagination;
pub mod validated;
pub mod visitor;

pub use auth::AdminUser;
pub use pagination::ArtworkListParams;
pub use validated::ValidatedJson;
pub use visitor::Visitor;
