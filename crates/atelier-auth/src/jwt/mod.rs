//! Admin access tokens.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{AdminClaims, TokenType};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
