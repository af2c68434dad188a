use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::Result,
    sql::{schema::Catalog, types::Record},
    storage::Key,
};

/// Abstract storage engine interface
///
/// Implementations only move bytes around. The typed operations are provided
/// on top and never fail on load: a missing or undecodable unit is replaced
/// by its empty default.
pub trait Engine {
    fn read(&mut self, key: &Key) -> Result<Option<Vec<u8>>>;
    fn write(&mut self, key: &Key, value: Vec<u8>) -> Result<()>;
    /// Removes the unit, no-op if it does not exist
    fn delete(&mut self, key: &Key) -> Result<()>;

    fn load_catalog(&mut self) -> Catalog {
        self.load(&Key::Catalog)
    }

    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        self.save(&Key::Catalog, catalog)
    }

    fn load_table(&mut self, name: &str) -> Vec<Record> {
        self.load(&Key::Table(name.to_string()))
    }

    fn save_table(&mut self, name: &str, records: &[Record]) -> Result<()> {
        self.save(&Key::Table(name.to_string()), records)
    }

    fn delete_table(&mut self, name: &str) -> Result<()> {
        self.delete(&Key::Table(name.to_string()))
    }

    /// Reads and decodes a unit, substituting the default on any failure
    fn load<T: DeserializeOwned + Default>(&mut self, key: &Key) -> T {
        match self.read(key) {
            Ok(Some(bytes)) => bincode::deserialize(&bytes).unwrap_or_else(|err| {
                tracing::warn!(?key, %err, "corrupt storage unit, using empty default");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(err) => {
                tracing::warn!(?key, %err, "failed to read storage unit, using empty default");
                T::default()
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &Key, value: &T) -> Result<()> {
        let bytes = bincode::serialize(value)?;
        tracing::debug!(?key, len = bytes.len(), "writing storage unit");
        self.write(key, bytes)
    }
}
