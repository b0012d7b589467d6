use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;

use super::{Credential, CredentialStore};

/// Credential pairs stored as a JSON object on disk:
/// ```json
/// {
///   "DMI Api-nøgle": { "username": "https://dmigw.govcloud.dk", "password": "<api key>" },
///   "CrushFTPPortServer": { "username": "22", "password": "sftp.example.org" }
/// }
/// ```
pub struct CredentialFile {
    entries: HashMap<String, Credential>,
}

impl CredentialFile {
    /// Loads the credentials from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read credentials file '{path}'"))?;
        Self::from_json(&content).with_context(|| format!("Invalid credentials file '{path}'"))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let entries: HashMap<String, Credential> = serde_json::from_str(content)?;
        Ok(Self { entries })
    }

    /// Iterates over the configured credential names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[async_trait::async_trait]
impl CredentialStore for CredentialFile {
    async fn get(&self, name: &str) -> Result<Credential> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("Credential '{name}' is not configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "DMI Api-nøgle": { "username": "https://dmigw.govcloud.dk", "password": "key" },
        "CrushFTPPortServer": { "username": "2222", "password": "sftp.example.org" }
    }"#;

    #[tokio::test]
    async fn test_get_known_credential() {
        let store = CredentialFile::from_json(JSON).unwrap();
        let dmi = store.get("DMI Api-nøgle").await.unwrap();
        assert_eq!(dmi.username, "https://dmigw.govcloud.dk");
        assert_eq!(dmi.password, "key");

        let mut names: Vec<_> = store.names().collect();
        names.sort();
        assert_eq!(names, vec!["CrushFTPPortServer", "DMI Api-nøgle"]);
    }

    #[tokio::test]
    async fn test_get_unknown_credential() {
        let store = CredentialFile::from_json(JSON).unwrap();
        let err = store.get("ChrushFTPGraddage").await.unwrap_err();
        assert!(err.to_string().contains("ChrushFTPGraddage"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, JSON).unwrap();

        assert!(CredentialFile::load(path.to_str().unwrap()).is_ok());
        assert!(CredentialFile::load("/nonexistent/credentials.json").is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let credential = Credential {
            username: "user".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{credential:?}").contains("hunter2"));
    }
}
