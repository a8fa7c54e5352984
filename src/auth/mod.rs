//! Local credential storage.

mod credentials;

pub use credentials::{CredentialStore, Credentials};
