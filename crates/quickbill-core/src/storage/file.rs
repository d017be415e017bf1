//! Directory-backed key-value store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, Result};

/// Stores each key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir`, creating it on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.get("quickbill_document").unwrap(), None);

        store.set("quickbill_document", "{}").unwrap();
        assert_eq!(store.get("quickbill_document").unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("data/quickbill_document.json").exists());

        store.remove("quickbill_document").unwrap();
        store.remove("quickbill_document").unwrap();
        assert_eq!(store.get("quickbill_document").unwrap(), None);
    }

    #[test]
    fn test_key_is_sanitized() {
        let store = FileStore::new("/tmp/qb");
        assert_eq!(store.path_for("../etc/passwd"), PathBuf::from("/tmp/qb/___etc_passwd.json"));
    }
}
