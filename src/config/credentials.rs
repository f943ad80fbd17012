use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the login file kept in the user's home directory
pub const RC_FILE_NAME: &str = ".cfdnsrc";

/// Account e-mail and global API key used to authenticate against Cloudflare.
///
/// Stored on disk as `{"email": "...", "key": "..."}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "email", alias = "identity")]
    pub identity: String,
    #[serde(rename = "key", alias = "secret")]
    pub secret: String,
}

impl Credentials {
    pub fn new(identity: &str, secret: &str) -> Self {
        Self {
            identity: identity.to_string(),
            secret: secret.to_string(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.identity.is_empty() && !self.secret.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Login data not found, please log in first.")]
    NotFound,

    #[error("Failed to access login data at {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize login data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The login file. Either absent or holding one complete credential pair.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.cfdnsrc`, if a home directory can be determined
    pub fn default_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().join(RC_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the login file with `credentials`, readable by the owner only
    pub fn save(&self, credentials: &Credentials) -> Result<(), CredentialError> {
        let content = serde_json::to_string(credentials)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let tmp_path = self.tmp_path();
        write_private(&tmp_path, content.as_bytes()).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            self.io_error(source)
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            self.io_error(source)
        })?;

        restrict_permissions(&self.path).map_err(|source| self.io_error(source))?;

        debug!(path = %self.path.display(), "Saved login data");
        Ok(())
    }

    /// Read the login file. Absent, unreadable and malformed files all count as
    /// "not logged in".
    pub fn load(&self) -> Result<Credentials, CredentialError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Login data unreadable");
                return Err(CredentialError::NotFound);
            }
        };

        match serde_json::from_str::<Credentials>(&content) {
            Ok(credentials) if credentials.is_complete() => Ok(credentials),
            Ok(_) => {
                debug!(path = %self.path.display(), "Login data is incomplete");
                Err(CredentialError::NotFound)
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Login data is malformed");
                Err(CredentialError::NotFound)
            }
        }
    }

    /// Delete the login file. Returns `false` when there was nothing to delete.
    pub fn clear(&self) -> Result<bool, CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| RC_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(unix)]
fn write_private(path: &Path, content: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(content)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
