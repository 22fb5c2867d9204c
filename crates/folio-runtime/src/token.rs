//! Persisted bearer token.
//!
//! The token lives in `<data-dir>/token` as a single line. It is read once
//! into a [`Session`] when a command starts.

use crate::Result;
use folio_client::Session;
use std::path::{Path, PathBuf};

pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("token"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let token = content.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, format!("{}\n", token.trim()))?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    /// Remove the stored token. Returns whether one was present.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        Ok(true)
    }

    /// Session carrying the stored token, signed out when there is none.
    pub fn session(&self) -> Result<Session> {
        let session = Session::new();
        if let Some(token) = self.load()? {
            session.sign_in(token);
        }
        Ok(session)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_clear() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = TokenStore::in_dir(temp_dir.path());

        assert_eq!(store.load()?, None);
        assert!(!store.session()?.is_signed_in());

        store.save("  abc.def  ")?;
        assert_eq!(store.load()?.as_deref(), Some("abc.def"));
        assert_eq!(store.session()?.token().as_deref(), Some("abc.def"));

        assert!(store.clear()?);
        assert!(!store.clear()?);
        assert_eq!(store.load()?, None);
        Ok(())
    }

    #[test]
    fn test_blank_file_is_signed_out() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = TokenStore::in_dir(temp_dir.path());
        std::fs::write(store.path(), "\n")?;

        assert!(!store.session()?.is_signed_in());
        Ok(())
    }

    #[test]
    fn test_save_creates_data_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = TokenStore::in_dir(&temp_dir.path().join("nested"));
        store.save("t")?;
        assert!(store.path().exists());
        Ok(())
    }
}
