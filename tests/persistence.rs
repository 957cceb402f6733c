use chunkworld::{
    Block, ChunkCache, ChunkCoord, ChunkRasterizer, ChunkStore, FileChunkStore, PngRasterizer,
    WorldConfig, WorldError,
};

fn config() -> WorldConfig {
    let mut config = WorldConfig {
        window_width: 80,
        window_height: 60,
        block_width: 20,
        block_height: 20,
        ..WorldConfig::default()
    };
    config.worldgen.wall_chance = 0.3;
    config
}

fn intra_links(coord: ChunkCoord, block: &Block) -> Vec<String> {
    block
        .links()
        .iter()
        .filter(|(_, target)| target.chunk == coord)
        .map(|(dir, target)| format!("{dir}:{}:{}", target.row, target.col))
        .collect()
}

#[test]
fn persist_evict_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileChunkStore::new(dir.path()).unwrap();
    let mut cache = ChunkCache::new(config(), store).unwrap();
    let coord = ChunkCoord::new(2, -1);

    let before = cache.resolve(coord, true).unwrap().unwrap().grid().clone();
    assert!(dir.path().join("chunk_2_-1.bin").is_file());

    let reloaded = cache.reload(coord).unwrap().grid().clone();
    assert_eq!(reloaded.len(), before.len());
    for ((_, old), (_, new)) in before.cells().zip(reloaded.cells()) {
        assert_eq!(old.position, new.position);
        assert_eq!(old.color, new.color);
        assert_eq!(old.collidable, new.collidable);
        assert_eq!((old.width, old.height), (new.width, new.height));
        assert_eq!(intra_links(coord, old), intra_links(coord, new));
    }
}

#[test]
fn a_new_cache_sees_persisted_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let coord = ChunkCoord::new(0, 0);

    let original = {
        let mut cache = ChunkCache::new(config(), FileChunkStore::new(dir.path()).unwrap()).unwrap();
        cache.resolve(coord, true).unwrap().unwrap().grid().blocks().to_vec()
    };

    let mut cache = ChunkCache::new(config(), FileChunkStore::new(dir.path()).unwrap()).unwrap();
    let loaded = cache.resolve(coord, false).unwrap().expect("chunk was persisted");
    assert_eq!(loaded.grid().blocks(), original.as_slice());
}

#[test]
fn reload_of_unknown_chunk_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = ChunkCache::new(config(), FileChunkStore::new(dir.path()).unwrap()).unwrap();
    assert!(matches!(
        cache.reload(ChunkCoord::new(4, 4)),
        Err(WorldError::MissingPersistedGrid(_))
    ));
}

#[test]
fn renamed_chunk_keeps_its_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = ChunkCache::new(config(), FileChunkStore::new(dir.path()).unwrap()).unwrap();
    let coord = ChunkCoord::new(0, 0);

    cache.resolve(coord, true).unwrap();
    cache.get_mut(coord).unwrap().set_name("Spawn");
    assert!(cache.persist(coord).unwrap());

    assert_eq!(cache.reload(coord).unwrap().name(), "Spawn");
    assert_eq!(cache.store().load(coord).unwrap().unwrap().name, "Spawn");
}

#[test]
fn background_is_written_once() {
    let world = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();
    let rasterizer = PngRasterizer::new(assets.path()).unwrap();
    let mut cache = ChunkCache::new(config(), FileChunkStore::new(world.path()).unwrap())
        .unwrap()
        .with_rasterizer(PngRasterizer::new(assets.path()).unwrap());

    let coord = ChunkCoord::new(1, 1);
    let chunk = cache.resolve(coord, true).unwrap().unwrap();
    let path = assets.path().join("Chunk(1, 1).png");
    assert!(path.is_file());
    assert_eq!(rasterizer.ensure_background(chunk).unwrap(), None);

    let image = image::open(&path).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (80, 60));
    // Row 0 is drawn at the bottom of the image.
    let origin = chunk.grid()[(0, 0)].color;
    assert_eq!(image.get_pixel(0, 59).0, origin);
}
