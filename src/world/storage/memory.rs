use crate::utils::error::StorageError;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::storage::{ChunkRecord, ChunkStore};
use std::collections::HashMap;

/// Volatile store, mostly useful for tests and throwaway worlds.
#[derive(Debug, Default, Clone)]
pub struct MemoryChunkStore {
    records: HashMap<ChunkCoord, ChunkRecord>,
}

impl MemoryChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ChunkStore for MemoryChunkStore {
    fn load(&self, coord: ChunkCoord) -> Result<Option<ChunkRecord>, StorageError> {
        Ok(self.records.get(&coord).cloned())
    }

    fn save(&mut self, record: &ChunkRecord) -> Result<(), StorageError> {
        self.records.insert(record.coord(), record.clone());
        Ok(())
    }

    fn contains(&self, coord: ChunkCoord) -> Result<bool, StorageError> {
        Ok(self.records.contains_key(&coord))
    }
}
