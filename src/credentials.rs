// Token persistence: one small JSON file per backend host, so tokens for
// different servers never overwrite each other.

use crate::error::CredentialsError;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, CredentialsError>;

/// Contents of a credentials file. An empty token means "not logged in".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    #[serde(default)]
    pub token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Credentials {
            token: token.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }
}

/// Default directory holding one credentials file per host.
pub fn default_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".hbd").join("credentials")
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

/// Path of the credentials file for `host` under `dir`.
pub fn path_for_host(dir: &Path, host: &str) -> PathBuf {
    dir.join(host)
}

/// Read credentials from `path`. A missing file yields empty credentials.
pub fn load(path: &Path) -> Result<Credentials> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no credentials at {}", path.display());
            return Ok(Credentials::default());
        }
        Err(source) => {
            return Err(CredentialsError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|source| CredentialsError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Write credentials to `path`, replacing whatever was there. Parent
/// directories are created as needed; both are readable by the owner only.
pub fn save(path: &Path, creds: &Credentials) -> Result<()> {
    let io_err = |source| CredentialsError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_private_dir(parent).map_err(io_err)?;
    }

    let mut file = open_private_file(path).map_err(io_err)?;
    let mut body = serde_json::to_vec(creds).map_err(|e| io_err(io::Error::from(e)))?;
    body.push(b'\n');
    file.write_all(&body).map_err(io_err)?;
    log::debug!("saved credentials to {}", path.display());
    Ok(())
}

/// Remove the credentials file. Fails with `NotFound` if it is already gone.
pub fn delete(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CredentialsError::NotFound(path.to_path_buf())
        } else {
            CredentialsError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn open_private_file(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
