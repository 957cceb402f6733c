use crate::config::{GridDims, WorldConfig};
use crate::entity::TickReport;
use crate::render::{ChunkRasterizer, RenderHandle};
use crate::utils::error::{Result, WorldError};
use crate::world::block::{Block, BlockRef};
use crate::world::builder::{ChunkBuilder, RemoteLink, Stitched};
use crate::world::chunk::Chunk;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::direction::Direction;
use crate::world::grid::ChunkGrid;
use crate::world::storage::{ChunkRecord, ChunkStore};
use log::{debug, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::collections::{HashMap, HashSet};

/// Owns every live chunk, keyed by coordinate.
///
/// Lookups fall through to the store, and with `create` set, to
/// generation. A chunk only enters the cache once it has been persisted
/// and activated.
pub struct ChunkCache {
    config: WorldConfig,
    dims: GridDims,
    chunks: HashMap<ChunkCoord, Chunk>,
    building: HashSet<ChunkCoord>,
    store: Box<dyn ChunkStore>,
    rasterizer: Option<Box<dyn ChunkRasterizer>>,
    next_handle: u64,
}

impl ChunkCache {
    pub fn new(config: WorldConfig, store: impl ChunkStore + 'static) -> Result<Self> {
        let dims = config.validate()?;
        info!(
            "Chunk cache ready: {}x{} blocks per chunk, seed {}",
            dims.rows, dims.cols, config.world_seed
        );
        Ok(Self {
            config,
            dims,
            chunks: HashMap::new(),
            building: HashSet::new(),
            store: Box::new(store),
            rasterizer: None,
            next_handle: 1,
        })
    }

    pub fn with_rasterizer(mut self, rasterizer: impl ChunkRasterizer + 'static) -> Self {
        self.rasterizer = Some(Box::new(rasterizer));
        self
    }

    /// Returns the chunk at `coord`, loading it from the store if needed.
    ///
    /// A chunk that was never persisted is generated when `create` is set,
    /// otherwise `Ok(None)` is returned.
    pub fn resolve(&mut self, coord: ChunkCoord, create: bool) -> Result<Option<&Chunk>> {
        Ok(self.ensure(coord, create)?.map(|chunk| &*chunk))
    }

    pub fn resolve_mut(&mut self, coord: ChunkCoord, create: bool) -> Result<Option<&mut Chunk>> {
        self.ensure(coord, create)
    }

    /// Like `resolve` with `create` set, for callers that need a chunk.
    pub fn resolve_or_create(&mut self, coord: ChunkCoord) -> Result<&Chunk> {
        let chunk = match self.take(coord)? {
            Some(chunk) => chunk,
            None => self.generate(coord)?,
        };
        Ok(&*self.insert(coord, chunk))
    }

    fn ensure(&mut self, coord: ChunkCoord, create: bool) -> Result<Option<&mut Chunk>> {
        let chunk = match self.take(coord)? {
            Some(chunk) => chunk,
            None if create => self.generate(coord)?,
            None => {
                trace!("Chunk {} is not persisted", coord);
                return Ok(None);
            }
        };
        Ok(Some(self.insert(coord, chunk)))
    }

    /// Takes the live chunk out of the map, or loads and activates the
    /// persisted one. The caller puts it back with `insert`.
    fn take(&mut self, coord: ChunkCoord) -> Result<Option<Chunk>> {
        if let Some(chunk) = self.chunks.remove(&coord) {
            return Ok(Some(chunk));
        }
        match self.store.load(coord)? {
            Some(record) => {
                let chunk = self.hydrate(coord, record)?;
                self.activate(chunk).map(Some)
            }
            None => Ok(None),
        }
    }

    fn insert(&mut self, coord: ChunkCoord, chunk: Chunk) -> &mut Chunk {
        self.chunks.entry(coord).or_insert(chunk)
    }

    fn generate(&mut self, coord: ChunkCoord) -> Result<Chunk> {
        if !self.building.insert(coord) {
            return Err(WorldError::ReentrantBuild(coord));
        }
        let result = self.generate_inner(coord);
        self.building.remove(&coord);
        result
    }

    /// Builds, saves and activates a new chunk. Its neighbors receive their
    /// remote links here; the chunk itself is left for the caller to insert.
    fn generate_inner(&mut self, coord: ChunkCoord) -> Result<Chunk> {
        let west = coord.offset(Direction::W);
        let south = coord.offset(Direction::S);
        // Never generate these: each would in turn want its own west and
        // south neighbors.
        self.ensure(west, false)?;
        self.ensure(south, false)?;

        let render = self.next_render_handle();
        let Stitched { grid, remote } = ChunkBuilder::new(coord, self.dims, &self.config)
            .with_west(self.live_grid(west))
            .with_south(self.live_grid(south))
            .with_east(self.live_grid(coord.offset(Direction::E)))
            .with_north(self.live_grid(coord.offset(Direction::N)))
            .build();

        let chunk = Chunk::new(grid, render, self.config.chunksys.max_objects);
        self.store.save(&chunk.to_record())?;
        let chunk = self.activate(chunk)?;

        for link in remote {
            self.apply_link(link);
        }
        info!("Generated chunk {}", coord);
        Ok(chunk)
    }

    fn live_grid(&self, coord: ChunkCoord) -> Option<&ChunkGrid> {
        self.chunks.get(&coord).map(Chunk::grid)
    }

    fn hydrate(&mut self, coord: ChunkCoord, record: ChunkRecord) -> Result<Chunk> {
        let grid = ChunkGrid::from_records(coord, self.dims, &record.blocks)?;
        let render = self.next_render_handle();
        debug!("Loaded chunk {} ({}) from store", coord, record.name);
        Ok(Chunk::new(grid, render, self.config.chunksys.max_objects).with_name(record.name))
    }

    /// Spawns walls and mobs and makes sure the background bitmap exists.
    fn activate(&self, mut chunk: Chunk) -> Result<Chunk> {
        let walls = chunk.spawn_walls();

        let mut rng = ChaCha12Rng::seed_from_u64(chunk.coord().seed(self.config.world_seed));
        // Terrain uses stream 0 of the same seed.
        rng.set_stream(1);
        let sys = &self.config.chunksys;
        let mobs = chunk.spawn_mobs(sys.mobs_per_chunk, sys.mob_size, &mut rng);

        if let Some(rasterizer) = &self.rasterizer {
            if let Some(path) = rasterizer.ensure_background(&chunk)? {
                debug!("Background for {} written to {}", chunk.coord(), path.display());
            }
        }

        debug!("Activated chunk {}: {} walls, {} mobs", chunk.coord(), walls, mobs);
        Ok(chunk)
    }

    fn apply_link(&mut self, link: RemoteLink) {
        match self
            .chunks
            .get_mut(&link.from.chunk)
            .and_then(|chunk| chunk.grid_mut().get_mut(link.from.row, link.from.col))
        {
            Some(block) => block.link(link.dir, link.to),
            None => trace!("Dropping link from unloaded chunk {}", link.from.chunk),
        }
    }

    fn next_render_handle(&mut self) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Drops the in-memory chunk and rebuilds it from its persisted record.
    pub fn reload(&mut self, coord: ChunkCoord) -> Result<&Chunk> {
        self.evict(coord);
        let record = self
            .store
            .load(coord)?
            .ok_or(WorldError::MissingPersistedGrid(coord))?;
        let chunk = self.hydrate(coord, record)?;
        let chunk = self.activate(chunk)?;
        Ok(&*self.insert(coord, chunk))
    }

    pub fn evict(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        let chunk = self.chunks.remove(&coord);
        if chunk.is_some() {
            info!("Evicted chunk {}", coord);
        }
        chunk
    }

    /// Writes the current state of a live chunk back to the store.
    pub fn persist(&mut self, coord: ChunkCoord) -> Result<bool> {
        match self.chunks.get(&coord) {
            Some(chunk) => {
                self.store.save(&chunk.to_record())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<_> = self.chunks.keys().copied().collect();
        coords.sort();
        coords
    }

    /// Follows a block handle into whichever live chunk owns it.
    pub fn block(&self, target: BlockRef) -> Option<&Block> {
        self.chunks.get(&target.chunk)?.grid().resolve(target)
    }

    pub fn tick(&mut self, coord: ChunkCoord) -> Option<TickReport> {
        self.chunks.get_mut(&coord).map(Chunk::tick)
    }

    pub fn tick_all(&mut self) -> TickReport {
        self.chunks
            .values_mut()
            .map(Chunk::tick)
            .fold(TickReport::default(), |acc, report| TickReport {
                updated: acc.updated + report.updated,
                collisions: acc.collisions + report.collisions,
            })
    }

    pub fn store(&self) -> &dyn ChunkStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }
}
