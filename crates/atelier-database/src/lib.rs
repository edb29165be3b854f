//! # atelier-database
//!
//! PostgreSQL connection management, migrations, and the gallery and
//! artwork repositories.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
