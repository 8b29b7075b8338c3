//! Session Token Store
//!
//! Persists the bearer token between CLI invocations.

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file {path:?}: {error}")]
    Io { path: PathBuf, error: String },
}

/// File-backed token store
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// A leading `~/` resolves to the home directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: expand_home(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        }
    }

    /// Stored token, `None` when signed out
    pub fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    pub fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        write_private(&self.path, token).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = ?self.path, "Saved session token");
        Ok(())
    }

    /// Forget the token; signing out twice is not an error
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

fn expand_home(path: PathBuf) -> PathBuf {
    let expanded = match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => Some(home.join(rest)),
        _ => None,
    };
    expanded.unwrap_or(path)
}

/// Write the token readable by its owner only
fn write_private(path: &Path, token: &str) -> std::io::Result<()> {
    #[cfg(unix)]
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path)?;
    // mode() only applies on creation
    #[cfg(unix)]
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(token.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session"));

        assert_eq!(store.load().unwrap(), None);

        store.save("token-123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("token-123"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_file_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(SessionStore::new(path).load().unwrap(), None);
    }

    #[test]
    fn test_home_prefix_expands() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let store = SessionStore::new("~/.local/share/recipe-manager/session");
        assert_eq!(
            store.path(),
            home.join(".local/share/recipe-manager/session")
        );

        let plain = SessionStore::new("/tmp/recipe-session");
        assert_eq!(plain.path(), Path::new("/tmp/recipe-session"));
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        SessionStore::new(&path).save("token-456").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "token-456");
    }
}
