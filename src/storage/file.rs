use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{error::Result, storage::{engine::Engine, Key}};

/// Extension of per-table record files
const TABLE_FILE_EXTENSION: &str = "tbl";

/// File-backed storage engine
///
/// Layout under the data directory:
///
/// ```text
/// <data_dir>/<catalog_file>   schema catalog
/// <data_dir>/<table>.tbl      records of one table
/// ```
///
/// Files are overwritten in place. There is no locking between processes.
pub struct FileEngine {
    data_dir: PathBuf,
    catalog_file: String,
}

impl FileEngine {
    pub fn new(data_dir: impl Into<PathBuf>, catalog_file: &str) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog_file: catalog_file.to_string(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing a storage unit
    pub fn path(&self, key: &Key) -> PathBuf {
        match key {
            Key::Catalog => self.data_dir.join(&self.catalog_file),
            Key::Table(name) => self
                .data_dir
                .join(format!("{}.{}", name, TABLE_FILE_EXTENSION)),
        }
    }
}

impl Engine for FileEngine {
    fn read(&mut self, key: &Key) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!(path = %path.display(), len = bytes.len(), "read storage file");
                Ok(Some(bytes))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &Key, value: Vec<u8>) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn delete(&mut self, key: &Key) -> Result<()> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed storage file");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileEngine;
    use crate::{
        error::Result,
        storage::{engine::Engine, Key},
    };

    #[test]
    fn test_layout() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let data_dir = dir.path().join("data");
        let mut eng = FileEngine::new(&data_dir, "db_meta.bin");

        assert_eq!(eng.path(&Key::Catalog), data_dir.join("db_meta.bin"));
        assert_eq!(eng.path(&Key::Table("users".into())), data_dir.join("users.tbl"));

        // the directory only appears on first write
        assert!(!data_dir.exists());
        eng.write(&Key::Table("users".into()), vec![1])?;
        assert!(data_dir.join("users.tbl").is_file());

        eng.delete_table("users")?;
        assert!(!data_dir.join("users.tbl").exists());
        Ok(())
    }
}
