use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A file selected for upload but not sent yet.
#[derive(Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    /// Local path the bytes were read from
    pub source: Option<PathBuf>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .field("source", &self.source)
            .finish()
    }
}

impl Attachment {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            mime: mime_for(&file_name).to_string(),
            file_name,
            bytes,
            source: None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let source = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        Ok(Self {
            mime: mime_for(&file_name).to_string(),
            file_name,
            bytes,
            source: Some(source),
        })
    }

    /// Local, temporary preview of the file. Nothing is uploaded.
    pub fn preview_url(&self) -> Option<String> {
        self.source
            .as_ref()
            .map(|path| format!("file://{}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(Attachment::from_bytes("a.PNG", vec![]).mime, "image/png");
        assert_eq!(Attachment::from_bytes("b.jpeg", vec![]).mime, "image/jpeg");
        assert_eq!(
            Attachment::from_bytes("notes", vec![]).mime,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_from_path_has_local_preview() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("cover.webp");
        std::fs::write(&path, b"RIFF")?;

        let attachment = Attachment::from_path(&path)?;
        assert_eq!(attachment.file_name, "cover.webp");
        assert_eq!(attachment.len(), 4);
        let preview = attachment.preview_url().unwrap();
        assert!(preview.starts_with("file://"));
        assert!(preview.ends_with("cover.webp"));
        Ok(())
    }

    #[test]
    fn test_from_path_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let err = Attachment::from_path(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NotAFile(_)));
    }

    #[test]
    fn test_in_memory_has_no_preview() {
        assert!(Attachment::from_bytes("a.png", vec![1]).preview_url().is_none());
    }
}
