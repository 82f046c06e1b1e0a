//! Request-scoped staging of uploaded audio files

use crate::utils;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A temporary on-disk staging of one uploaded file
///
/// The upload is owned by the request that created it and must not
/// outlive it. Removal happens exactly once through [`Self::remove`];
/// `Drop` is only a backstop for unexpected unwinds.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    original_name: String,
    mime_type: String,
    size_bytes: u64,
    removed: bool,
}

impl StagedUpload {
    /// Write `bytes` into `dir` under a unique, sanitized name
    ///
    /// # Errors
    ///
    /// Returns an error if the staging directory cannot be created or
    /// the payload cannot be written.
    pub fn stage(
        dir: &Path,
        original_name: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> io::Result<Self> {
        fs::create_dir_all(dir)?;

        let path = dir.join(utils::generate_staging_filename(original_name));
        fs::write(&path, bytes)?;

        Ok(Self {
            path,
            original_name: original_name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes: bytes.len() as u64,
            removed: false,
        })
    }

    /// Path of the staged file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Original filename as declared by the client
    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// MIME type as declared by the client
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Size of the staged payload in bytes
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Delete the staged file; subsequent calls are no-ops
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove(&mut self) -> io::Result<()> {
        if self.removed {
            return Ok(());
        }
        self.removed = true;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if !self.removed
            && let Err(e) = fs::remove_file(&self.path)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!(
                "failed to clean up staged upload {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_stage_writes_payload() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let staged = StagedUpload::stage(dir.path(), "clip.mp3", "audio/mpeg", b"audio bytes")
            .expect("Failed to stage upload");

        assert!(staged.path().exists());
        assert_eq!(staged.original_name(), "clip.mp3");
        assert_eq!(staged.mime_type(), "audio/mpeg");
        assert_eq!(staged.size_bytes(), 11);
        assert_eq!(fs::read(staged.path()).unwrap(), b"audio bytes");
    }

    #[test]
    fn test_staged_names_are_unique() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let a = StagedUpload::stage(dir.path(), "clip.mp3", "audio/mpeg", b"a").unwrap();
        let b = StagedUpload::stage(dir.path(), "clip.mp3", "audio/mpeg", b"b").unwrap();

        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_remove_deletes_file_once() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut staged = StagedUpload::stage(dir.path(), "clip.wav", "audio/wav", b"x").unwrap();
        let path = staged.path().to_path_buf();

        staged.remove().expect("first removal should succeed");
        assert!(!path.exists());

        // Second call is a no-op
        staged.remove().expect("second removal should be a no-op");
    }

    #[test]
    fn test_remove_tolerates_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut staged = StagedUpload::stage(dir.path(), "clip.wav", "audio/wav", b"x").unwrap();

        fs::remove_file(staged.path()).unwrap();
        staged.remove().expect("removal of missing file is not an error");
    }

    #[test]
    fn test_drop_removes_unreleased_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = {
            let staged =
                StagedUpload::stage(dir.path(), "clip.ogg", "audio/ogg", b"x").unwrap();
            staged.path().to_path_buf()
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_drop_after_remove_is_quiet() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut staged = StagedUpload::stage(dir.path(), "clip.ogg", "audio/ogg", b"x").unwrap();
        staged.remove().unwrap();
        drop(staged);
    }

    #[test]
    fn test_stage_creates_missing_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let nested = dir.path().join("staging").join("deep");

        let staged = StagedUpload::stage(&nested, "a.m4a", "audio/m4a", b"x").unwrap();
        assert!(staged.path().starts_with(&nested));
    }
}
