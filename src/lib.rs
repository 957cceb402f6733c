pub mod config;
pub mod entity;
pub mod render;
pub mod utils;
pub mod world;

// Re-export commonly used types
pub use config::chunksys::ChunkSysConfig;
pub use config::core::{GridDims, WorldConfig};
pub use config::worldgen::WorldGenConfig;
pub use entity::{Entities, GameObject, Mob, ObjectKind, TickReport, Wall};
pub use render::{ChunkRasterizer, PngRasterizer, RenderHandle};
pub use utils::error::{ConfigError, Result, StorageError, WorldError};
pub use utils::math::Rect;
pub use world::block::{Block, BlockRef};
pub use world::cache::ChunkCache;
pub use world::chunk::Chunk;
pub use world::chunk_coord::ChunkCoord;
pub use world::direction::Direction;
pub use world::grid::ChunkGrid;
pub use world::storage::{ChunkStore, FileChunkStore, MemoryChunkStore};
