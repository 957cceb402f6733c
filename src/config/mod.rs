pub mod chunksys;
pub mod core;
pub mod worldgen;

pub use chunksys::ChunkSysConfig;
pub use self::core::{default_config_path, GridDims, WorldConfig};
pub use worldgen::WorldGenConfig;
