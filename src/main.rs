use anyhow::{Context, Result};
use log::info;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

use chunkworld::{
    config::{default_config_path, WorldConfig},
    ChunkCache, ChunkCoord, FileChunkStore, PngRasterizer,
};

const DEMO_TICKS: usize = 60;

fn main() -> Result<()> {
    let config_path = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => default_config_path()?,
    };
    let config = WorldConfig::load_or_create(&config_path)?;

    SimpleLogger::new().with_level(config.log_filter()).init()?;
    info!("Using config {}", config_path.display());

    let store = FileChunkStore::new(&config.chunksys.storage_dir)
        .with_context(|| format!("Failed to open chunk store {}", config.chunksys.storage_dir.display()))?;
    let rasterizer = PngRasterizer::new(&config.chunksys.asset_dir).context("Failed to open asset directory")?;
    let mut cache = ChunkCache::new(config, store)?.with_rasterizer(rasterizer);

    let origin = ChunkCoord::new(0, 0);
    let spawn = cache.resolve_or_create(origin)?;
    info!(
        "Spawn chunk {} has {} blocks and {} objects",
        spawn.name(),
        spawn.grid().len(),
        spawn.entities().len()
    );

    for coord in cache.neighbors(origin)? {
        info!("Neighbor {} is live", coord);
    }

    for tick in 0..DEMO_TICKS {
        if let Some(report) = cache.tick(origin) {
            if report.collisions > 0 {
                info!("Tick {}: {} collisions", tick, report.collisions);
            }
        }
    }

    let total = cache.tick_all();
    info!(
        "{} chunks live, {} objects updated in the final pass",
        cache.len(),
        total.updated
    );
    Ok(())
}
