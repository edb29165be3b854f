//! Visitor unlock tokens.
//!
//! A successful password check returns a signed token listing every
//! gallery and artwork the visitor has unlocked so far. Clients send it
//! back on reads; the server trusts only what the signature covers.

pub mod grant;
pub mod token;

pub use grant::UnlockGrant;
pub use token::{UnlockClaims, UnlockTokens};
