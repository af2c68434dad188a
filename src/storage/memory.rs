use std::collections::BTreeMap;

use crate::{error::Result, storage::{engine::Engine, Key}};

/// In-memory storage engine
#[derive(Default)]
pub struct MemoryEngine {
    data: BTreeMap<Key, Vec<u8>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self { data: BTreeMap::new() }
    }

    /// Number of stored units, catalog included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Engine for MemoryEngine {
    fn read(&mut self, key: &Key) -> Result<Option<Vec<u8>>> {
        Ok(self.data.get(key).cloned())
    }

    fn write(&mut self, key: &Key, value: Vec<u8>) -> Result<()> {
        self.data.insert(key.clone(), value);
        Ok(())
    }

    fn delete(&mut self, key: &Key) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }
}
