use anyhow::{Context, Result};

use super::{Credential, CredentialStore};

const PREFIX: &str = "GRADDAGE";

/// Reads credential pairs from `GRADDAGE_<NAME>_USERNAME` and
/// `GRADDAGE_<NAME>_PASSWORD`, where `<NAME>` is the credential name
/// upper-cased with every other character replaced by `_`.
///
/// `CrushFTPPortServer` is read from `GRADDAGE_CRUSHFTPPORTSERVER_USERNAME`.
#[derive(Debug, Default)]
pub struct EnvCredentialStore;

impl EnvCredentialStore {
    /// Environment variable holding `field` of credential `name`.
    pub fn var_name(name: &str, field: &str) -> String {
        let normalized: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{PREFIX}_{normalized}_{field}")
    }

    fn read(name: &str, field: &str) -> Result<String> {
        let var = Self::var_name(name, field);
        std::env::var(&var).with_context(|| format!("Credential '{name}': {var} is not set"))
    }
}

#[async_trait::async_trait]
impl CredentialStore for EnvCredentialStore {
    async fn get(&self, name: &str) -> Result<Credential> {
        Ok(Credential {
            username: Self::read(name, "USERNAME")?,
            password: Self::read(name, "PASSWORD")?,
        })
    }
}
