use crate::entity::{Entities, Mob, TickReport, Wall};
use crate::render::RenderHandle;
use crate::utils::math::Rect;
use crate::world::block::Block;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::direction::Direction;
use crate::world::grid::ChunkGrid;
use crate::world::storage::ChunkRecord;
use glam::Vec2;
use log::trace;
use rand::Rng;

/// One window-sized piece of the world: its block grid plus live objects.
#[derive(Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    name: String,
    grid: ChunkGrid,
    entities: Entities,
    render: RenderHandle,
    neighbors: [Option<ChunkCoord>; 8],
}

impl Chunk {
    pub fn new(grid: ChunkGrid, render: RenderHandle, max_objects: usize) -> Self {
        let coord = grid.coord();
        Self {
            coord,
            name: Self::default_name(coord),
            grid,
            entities: Entities::new(max_objects),
            render,
            neighbors: [None; 8],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn default_name(coord: ChunkCoord) -> String {
        format!("Chunk{}", coord)
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn img_file_name(&self) -> String {
        format!("{}.png", self.name)
    }

    pub fn grid(&self) -> &ChunkGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut ChunkGrid {
        &mut self.grid
    }

    pub fn block(&self, row: usize, col: usize) -> Option<&Block> {
        self.grid.get(row, col)
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut Entities {
        &mut self.entities
    }

    pub fn render_handle(&self) -> RenderHandle {
        self.render
    }

    /// Pixel width and height covered by the grid.
    pub fn pixel_size(&self) -> (u32, u32) {
        match self.grid.blocks().first() {
            Some(block) => (
                block.width * self.grid.cols() as u32,
                block.height * self.grid.rows() as u32,
            ),
            None => (0, 0),
        }
    }

    pub fn bounds(&self) -> Rect {
        let (width, height) = self.pixel_size();
        Rect::new(Vec2::ZERO, Vec2::new(width as f32, height as f32))
    }

    pub fn to_record(&self) -> ChunkRecord {
        ChunkRecord {
            x: self.coord.x(),
            y: self.coord.y(),
            name: self.name.clone(),
            blocks: self.grid.to_records(),
        }
    }

    /// Adds a wall over every collidable block. Returns how many fit the
    /// object budget.
    pub fn spawn_walls(&mut self) -> usize {
        let mut spawned = 0;
        for block in self.grid.blocks().iter().filter(|b| b.collidable) {
            if !self.entities.spawn(Box::new(Wall::from_block(block))) {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Drops `count` mobs at random spots of the chunk, edges included.
    pub fn spawn_mobs<R: Rng>(&mut self, count: usize, size: u32, rng: &mut R) -> usize {
        let area = self.bounds();
        let mut spawned = 0;
        for _ in 0..count {
            let mob = Mob::spawn_random(rng, area, size, self.render);
            if !self.entities.spawn(Box::new(mob)) {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    pub fn tick(&mut self) -> TickReport {
        let report = self.entities.tick();
        trace!(
            "Ticked chunk {}: {} updated, {} collisions",
            self.coord,
            report.updated,
            report.collisions
        );
        report
    }

    pub fn memoized_neighbor(&self, dir: Direction) -> Option<ChunkCoord> {
        self.neighbors[dir.index()]
    }

    pub(crate) fn memoize_neighbor(&mut self, dir: Direction, coord: ChunkCoord) {
        self.neighbors[dir.index()] = Some(coord);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridDims;
    use crate::world::storage::BlockRecord;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn chunk(collidable: &[(i32, i32)]) -> Chunk {
        let coord = ChunkCoord::new(1, -2);
        let dims = GridDims { rows: 2, cols: 3 };
        let mut records = Vec::new();
        for y in 0..2 {
            for x in 0..3 {
                records.push(BlockRecord {
                    chunk: coord,
                    x,
                    y,
                    width: 20,
                    height: 10,
                    color: [9, 9, 9],
                    collidable: collidable.contains(&(x, y)),
                });
            }
        }
        let grid = ChunkGrid::from_records(coord, dims, &records).unwrap();
        Chunk::new(grid, RenderHandle(4), 16)
    }

    #[test]
    fn default_name_and_image() {
        let chunk = chunk(&[]);
        assert_eq!(chunk.name(), "Chunk(1, -2)");
        assert_eq!(chunk.img_file_name(), "Chunk(1, -2).png");
        assert_eq!(chunk.with_name("Spawn").img_file_name(), "Spawn.png");
    }

    #[test]
    fn pixel_size_follows_grid() {
        assert_eq!(chunk(&[]).pixel_size(), (60, 20));
    }

    #[test]
    fn one_wall_per_collidable_block() {
        let mut chunk = chunk(&[(0, 0), (2, 1)]);
        assert_eq!(chunk.spawn_walls(), 2);
        assert_eq!(chunk.entities().walls().len(), 2);
        let bounds = chunk.entities().walls()[1].bounds();
        assert_eq!(bounds.min, Vec2::new(40.0, 10.0));
        assert_eq!(bounds.max, Vec2::new(60.0, 20.0));
    }

    #[test]
    fn mobs_respect_budget() {
        let mut chunk = chunk(&[]);
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        assert_eq!(chunk.spawn_mobs(20, 5, &mut rng), 16);
        assert_eq!(chunk.entities().mobs().len(), 16);
    }

    #[test]
    fn record_keeps_name_and_blocks() {
        let chunk = chunk(&[(1, 1)]).with_name("Home");
        let record = chunk.to_record();
        assert_eq!(record.coord(), ChunkCoord::new(1, -2));
        assert_eq!(record.name, "Home");
        assert_eq!(record.blocks.len(), 6);
        assert!(record.blocks.iter().all(|b| b.chunk == ChunkCoord::new(1, -2)));
    }

    #[test]
    fn neighbor_memo_starts_empty() {
        let mut chunk = chunk(&[]);
        assert_eq!(chunk.memoized_neighbor(Direction::N), None);
        chunk.memoize_neighbor(Direction::N, ChunkCoord::new(1, -1));
        assert_eq!(chunk.memoized_neighbor(Direction::N), Some(ChunkCoord::new(1, -1)));
    }
}
