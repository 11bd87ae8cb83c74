use super::StorageBackend;
use crate::error::{InkpadError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed storage: each key lives in `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(InkpadError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InkpadError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(temp_dir.path().to_path_buf());
        assert_eq!(backend.read("notebook").unwrap(), None);
    }

    #[test]
    fn write_creates_root_and_round_trips() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("nested").join("data");
        let backend = FsBackend::new(root.clone());

        backend.write("notebook", "[]").unwrap();
        assert!(root.join("notebook.json").exists());
        assert_eq!(backend.read("notebook").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(temp_dir.path().to_path_buf());
        backend.write("notebook", "one").unwrap();
        backend.write("notebook", "two").unwrap();

        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["notebook.json".to_string()]);
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(temp_dir.path().to_path_buf());
        assert!(backend.write("../escape", "x").is_err());
        assert!(backend.read("").is_err());
    }
}
