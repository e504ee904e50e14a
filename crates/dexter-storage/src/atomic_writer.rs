//! Atomic file writer: write to a sibling temp file, rename on commit

use crate::traits::StorageResult;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes to `<path>.tmp` and renames over `path` on commit.
///
/// Dropping an uncommitted writer removes the temp file, so readers only ever
/// see the previous content or the complete new content.
pub struct AtomicWriter {
    temp_path: PathBuf,
    final_path: PathBuf,
    file: File,
}

impl AtomicWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let final_path = path.as_ref().to_path_buf();

        if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = Self::temp_path(&final_path);
        let file = File::create(&temp_path)?;

        Ok(Self {
            temp_path,
            final_path,
            file,
        })
    }

    pub fn write(&mut self, data: &[u8]) -> StorageResult<()> {
        self.file.write_all(data)?;
        Ok(())
    }

    /// Flush, sync and move the temp file into place
    pub fn commit(mut self) -> StorageResult<()> {
        self.file.flush()?;
        self.file.sync_all()?;

        fs::rename(&self.temp_path, &self.final_path)?;
        // Nothing left for Drop to clean up
        self.temp_path = PathBuf::new();
        Ok(())
    }

    /// Write `data` to `path` in one step
    pub fn write_all<P: AsRef<Path>>(path: P, data: &[u8]) -> StorageResult<()> {
        let mut writer = Self::new(path)?;
        writer.write(data)?;
        writer.commit()
    }

    fn temp_path(final_path: &Path) -> PathBuf {
        let mut temp = final_path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

impl Drop for AtomicWriter {
    fn drop(&mut self) {
        if !self.temp_path.as_os_str().is_empty() {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");

        let mut writer = AtomicWriter::new(&file_path).unwrap();
        writer.write(b"{\"dexterUser\":\"{}\"}").unwrap();
        writer.commit().unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "{\"dexterUser\":\"{}\"}");
        assert!(!temp_dir.path().join("session.json.tmp").exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join(".dexter/session.json");

        AtomicWriter::write_all(&file_path, b"{}").unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn test_uncommitted_write_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");
        fs::write(&file_path, b"previous").unwrap();

        {
            let mut writer = AtomicWriter::new(&file_path).unwrap();
            writer.write(b"half written").unwrap();
        }

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "previous");
        assert!(!temp_dir.path().join("session.json.tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("session.json");
        fs::write(&file_path, b"Old content").unwrap();

        AtomicWriter::write_all(&file_path, b"New content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "New content");
    }
}
