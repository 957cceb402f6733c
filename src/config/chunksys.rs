use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSysConfig {
    /// Mobs spawned each time a chunk is activated.
    pub mobs_per_chunk: usize,
    /// Side length of a spawned mob, in pixels.
    pub mob_size: u32,
    /// Upper bound on live objects per chunk; spawning stops once reached.
    pub max_objects: usize,
    pub storage_dir: PathBuf,
    pub asset_dir: PathBuf,
}

impl Default for ChunkSysConfig {
    fn default() -> Self {
        Self {
            mobs_per_chunk: 5,
            mob_size: 50,
            max_objects: 512,
            storage_dir: PathBuf::from("worlds/default"),
            asset_dir: PathBuf::from("assets/chunks"),
        }
    }
}
