//! Capability traits injected into the client.

mod tokens;

pub use tokens::{StaticToken, TokenProvider};
