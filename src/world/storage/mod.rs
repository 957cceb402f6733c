pub mod file;
pub mod memory;

pub use file::FileChunkStore;
pub use memory::MemoryChunkStore;

use crate::utils::error::StorageError;
use crate::world::block::Rgb;
use crate::world::chunk_coord::ChunkCoord;
use serde::{Deserialize, Serialize};

/// Persisted form of a single block, keyed to its owning chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub chunk: ChunkCoord,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
    pub collidable: bool,
}

/// Persisted form of a chunk. Links are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub blocks: Vec<BlockRecord>,
}

impl ChunkRecord {
    pub fn coord(&self) -> ChunkCoord {
        ChunkCoord::new(self.x, self.y)
    }
}

/// Load/save gateway for chunk records.
pub trait ChunkStore {
    fn load(&self, coord: ChunkCoord) -> Result<Option<ChunkRecord>, StorageError>;

    /// Persists the record. Implementations must make the block list durable
    /// before the chunk itself becomes loadable.
    fn save(&mut self, record: &ChunkRecord) -> Result<(), StorageError>;

    fn contains(&self, coord: ChunkCoord) -> Result<bool, StorageError> {
        Ok(self.load(coord)?.is_some())
    }
}
