//! JWT claims and wire codec.

pub mod claims;
pub mod serializer;

pub use claims::Claims;
pub use serializer::JwtCodec;
