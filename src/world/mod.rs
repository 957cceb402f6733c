pub mod block;
pub mod builder;
pub mod cache;
pub mod chunk;
pub mod chunk_coord;
pub mod direction;
pub mod grid;
pub mod neighbors;
pub mod storage;

// Re-export commonly used types
pub use block::{Block, BlockRef, Links, Rgb};
pub use builder::{ChunkBuilder, RemoteLink, Stitched};
pub use cache::ChunkCache;
pub use chunk::Chunk;
pub use chunk_coord::ChunkCoord;
pub use direction::Direction;
pub use grid::ChunkGrid;
pub use storage::{BlockRecord, ChunkRecord, ChunkStore, FileChunkStore, MemoryChunkStore};
