//! # atelier-auth
//!
//! Credentials and access decisions for Atelier.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing for gallery, artwork, and admin passwords
//! - `protection`: effective-password inheritance and unlock checks
//! - `unlock`: signed, time-boxed visitor unlock tokens
//! - `jwt`: admin access tokens
//! - `admin`: admin credential verification

pub mod admin;
pub mod jwt;
pub mod password;
pub mod protection;
pub mod unlock;

pub use admin::AdminAuthenticator;
pub use jwt::{AdminClaims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use protection::ProtectionIndex;
pub use unlock::{UnlockGrant, UnlockTokens};
