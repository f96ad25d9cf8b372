//! Physical file storage for mediadeck.
//!
//! Uploaded bytes and thumbnails live in a flat content directory keyed
//! by a generated UUID-based filename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{MediadeckError, Result};

/// File storage service for managing physical files.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    /// Base directory for file storage.
    base_path: PathBuf,
}

impl MediaStorage {
    /// Create a new MediaStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Generate a new collision-resistant stored name preserving the
    /// original extension ("bin" when there is none).
    pub fn generate_stored_name(original_name: &str) -> String {
        let uuid = Uuid::new_v4();
        let ext = Self::extract_extension(original_name);
        format!("{uuid}.{ext}")
    }

    /// Derived stored name for a file's thumbnail.
    pub fn thumbnail_name(stored_name: &str) -> String {
        format!("thumb_{stored_name}.jpg")
    }

    /// Save content under a specific stored name.
    pub fn save(&self, content: &[u8], stored_name: &str) -> Result<()> {
        fs::write(self.file_path(stored_name), content)?;
        Ok(())
    }

    /// Load content from storage.
    pub fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        match fs::read(self.file_path(stored_name)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(MediadeckError::NotFound(format!("file {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a file from storage.
    ///
    /// Returns `true` if the file was deleted, `false` if it didn't exist.
    pub fn delete(&self, stored_name: &str) -> Result<bool> {
        match fs::remove_file(self.file_path(stored_name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a file exists in storage.
    pub fn exists(&self, stored_name: &str) -> bool {
        self.file_path(stored_name).exists()
    }

    /// Get the full path for a stored name.
    pub fn file_path(&self, stored_name: &str) -> PathBuf {
        self.base_path.join(stored_name)
    }

    /// Extract the lowercased extension from a filename.
    ///
    /// Returns "bin" if no extension is found.
    fn extract_extension(filename: &str) -> String {
        Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| "bin".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_storage() -> (TempDir, MediaStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = MediaStorage::new(temp_dir.path()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage_path = temp_dir.path().join("uploads");

        assert!(!storage_path.exists());

        let storage = MediaStorage::new(&storage_path).unwrap();

        assert!(storage_path.exists());
        assert_eq!(storage.base_path(), storage_path);
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, storage) = setup_storage();
        let content = b"Hello, World!";
        let stored_name = MediaStorage::generate_stored_name("test.txt");

        storage.save(content, &stored_name).unwrap();

        let loaded = storage.load(&stored_name).unwrap();
        assert_eq!(loaded, content);
    }

    #[test]
    fn test_generate_stored_name() {
        let name1 = MediaStorage::generate_stored_name("photo.PNG");
        let name2 = MediaStorage::generate_stored_name("photo.PNG");

        assert_ne!(name1, name2);
        assert!(name1.ends_with(".png"));
        assert!(name1.len() > 36);

        let no_ext = MediaStorage::generate_stored_name("no_extension");
        assert!(no_ext.ends_with(".bin"));
    }

    #[test]
    fn test_thumbnail_name() {
        assert_eq!(
            MediaStorage::thumbnail_name("abc.png"),
            "thumb_abc.png.jpg"
        );
    }

    #[test]
    fn test_load_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.load("nonexistent.txt");

        assert!(matches!(result, Err(MediadeckError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = setup_storage();
        let stored_name = MediaStorage::generate_stored_name("delete.txt");

        storage.save(b"to delete", &stored_name).unwrap();
        assert!(storage.exists(&stored_name));

        let deleted = storage.delete(&stored_name).unwrap();
        assert!(deleted);
        assert!(!storage.exists(&stored_name));
    }

    #[test]
    fn test_delete_not_found_is_not_an_error() {
        let (_temp_dir, storage) = setup_storage();

        let deleted = storage.delete("nonexistent.txt").unwrap();
        assert!(!deleted);
    }

    #[test]
    fn test_binary_content_round_trip() {
        let (_temp_dir, storage) = setup_storage();

        let content: Vec<u8> = (0..=255).collect();
        let stored_name = MediaStorage::generate_stored_name("binary.bin");

        storage.save(&content, &stored_name).unwrap();
        let loaded = storage.load(&stored_name).unwrap();

        assert_eq!(loaded, content);
    }
}
