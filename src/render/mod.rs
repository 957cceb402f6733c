pub mod raster;

pub use raster::{ChunkRasterizer, PngRasterizer};

use serde::{Deserialize, Serialize};

/// Opaque token linking a chunk and its spawned objects to whatever draws them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderHandle(pub u64);
