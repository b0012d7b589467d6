//! Named credential pairs.
//!
//! [`CredentialStore`] is the async trait for resolving a credential name into
//! its `(username, password)` pair. The pair is opaque here; each caller
//! decides what the two halves mean.
//! [`CredentialFile`] reads pairs from a JSON file and [`EnvCredentialStore`]
//! from environment variables.

mod env;
mod file;

pub use env::EnvCredentialStore;
pub use file::CredentialFile;

use anyhow::Result;
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Resolves a credential name into its plaintext pair.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Credential>;
}
