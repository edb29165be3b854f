//! Password verification and unlock token issuance.

pub mod service;

pub use service::{AccessService, VerifyOutcome};
