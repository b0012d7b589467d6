//! Delivery of the report to the SFTP server.

use anyhow::{Context, Result, anyhow};
use ssh2::Session;
use std::fs::File;
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::infra::credentials::Credential;

/// Copies a local file to a remote path.
///
/// `server` carries the port as username and the host as password;
/// `account` is the login.
#[async_trait::async_trait]
pub trait FileTransfer: Send + Sync {
    async fn put(
        &self,
        server: &Credential,
        account: &Credential,
        local: &Path,
        remote: &str,
    ) -> Result<()>;
}

/// [`FileTransfer`] over SSH password authentication and SFTP.
#[derive(Debug, Default)]
pub struct SftpTransfer;

#[async_trait::async_trait]
impl FileTransfer for SftpTransfer {
    async fn put(
        &self,
        server: &Credential,
        account: &Credential,
        local: &Path,
        remote: &str,
    ) -> Result<()> {
        let port: u16 = server
            .username
            .trim()
            .parse()
            .with_context(|| format!("Invalid SFTP port '{}'", server.username))?;
        let host = server.password.clone();
        let account = account.clone();
        let local = local.to_path_buf();
        let remote = remote.to_string();

        tokio::task::spawn_blocking(move || sftp_put(&host, port, &account, &local, &remote)).await?
    }
}

fn sftp_put(host: &str, port: u16, account: &Credential, local: &Path, remote: &str) -> Result<()> {
    let tcp = TcpStream::connect((host, port))
        .with_context(|| format!("Cannot connect to {host}:{port}"))?;
    let mut session = Session::new()?;
    session.set_tcp_stream(tcp);
    session.handshake().context("SSH handshake failed")?;
    debug!(host, port, "Connected");

    session
        .userauth_password(&account.username, &account.password)
        .with_context(|| format!("Authentication failed for '{}'", account.username))?;
    if !session.authenticated() {
        return Err(anyhow!("Server did not accept credentials for '{}'", account.username));
    }

    {
        // The SFTP channel closes when it goes out of scope, also on error.
        let sftp = session.sftp().context("Cannot open SFTP channel")?;
        let mut source =
            File::open(local).with_context(|| format!("Cannot open {}", local.display()))?;
        let mut target = sftp
            .create(Path::new(remote))
            .with_context(|| format!("Cannot create remote file {remote}"))?;
        let bytes = std::io::copy(&mut source, &mut target)
            .with_context(|| format!("Copy to {remote} failed"))?;
        debug!(bytes, remote, "Copied");
    }

    session.disconnect(None, "upload complete", None)?;
    Ok(())
}

/// Remote path for `file_name` inside `remote_dir`.
pub fn remote_path(remote_dir: &str, file_name: &str) -> String {
    format!("{}/{}", remote_dir.trim_end_matches('/'), file_name)
}

/// Uploads `local` into `remote_dir` under its own file name, then deletes it.
///
/// When the transfer fails the local file is left in place.
#[tracing::instrument(skip(transfer, server, account, local), fields(local = %local.display()))]
pub async fn deliver(
    transfer: &dyn FileTransfer,
    server: &Credential,
    account: &Credential,
    local: &Path,
    remote_dir: &str,
) -> Result<PathBuf> {
    let file_name = local
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("{} has no file name", local.display()))?;
    let remote = remote_path(remote_dir, file_name);

    transfer
        .put(server, account, local, &remote)
        .await
        .with_context(|| format!("Upload of {} to {remote} failed", local.display()))?;
    info!(host = %server.password, remote = %remote, "File uploaded");

    std::fs::remove_file(local).with_context(|| format!("Cannot delete {}", local.display()))?;
    debug!("Local file removed");

    Ok(PathBuf::from(remote))
}
