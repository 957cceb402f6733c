use crate::config::{GridDims, WorldConfig, WorldGenConfig};
use crate::world::block::{Block, BlockRef};
use crate::world::chunk_coord::ChunkCoord;
use crate::world::direction::Direction;
use crate::world::grid::ChunkGrid;
use glam::IVec2;
use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// A link to set on a block that lives in another chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteLink {
    pub from: BlockRef,
    pub dir: Direction,
    pub to: BlockRef,
}

/// Result of a build: the new grid plus the links its neighbors must receive.
#[derive(Debug)]
pub struct Stitched {
    pub grid: ChunkGrid,
    pub remote: Vec<RemoteLink>,
}

/// Grows a chunk grid row by row so it tiles with its already-built
/// neighbors.
///
/// West and south neighbors take part in generation: their edge blocks are
/// extruded into this chunk and linked. East and north neighbors, when they
/// are live, only receive links once the grid is complete.
pub struct ChunkBuilder<'a> {
    coord: ChunkCoord,
    dims: GridDims,
    block_size: (u32, u32),
    worldgen: &'a WorldGenConfig,
    west: Option<&'a ChunkGrid>,
    south: Option<&'a ChunkGrid>,
    east: Option<&'a ChunkGrid>,
    north: Option<&'a ChunkGrid>,
    rng: ChaCha12Rng,
    blocks: Vec<Block>,
    remote: Vec<RemoteLink>,
}

impl<'a> ChunkBuilder<'a> {
    pub fn new(coord: ChunkCoord, dims: GridDims, config: &'a WorldConfig) -> Self {
        Self {
            coord,
            dims,
            block_size: (config.block_width, config.block_height),
            worldgen: &config.worldgen,
            west: None,
            south: None,
            east: None,
            north: None,
            rng: ChaCha12Rng::seed_from_u64(coord.seed(config.world_seed)),
            blocks: Vec::with_capacity(dims.len()),
            remote: Vec::new(),
        }
    }

    pub fn with_west(mut self, west: Option<&'a ChunkGrid>) -> Self {
        self.west = west.filter(|grid| self.compatible(grid));
        self
    }

    pub fn with_south(mut self, south: Option<&'a ChunkGrid>) -> Self {
        self.south = south.filter(|grid| self.compatible(grid));
        self
    }

    pub fn with_east(mut self, east: Option<&'a ChunkGrid>) -> Self {
        self.east = east.filter(|grid| self.compatible(grid));
        self
    }

    pub fn with_north(mut self, north: Option<&'a ChunkGrid>) -> Self {
        self.north = north.filter(|grid| self.compatible(grid));
        self
    }

    fn compatible(&self, grid: &ChunkGrid) -> bool {
        grid.dims() == self.dims
    }

    pub fn build(mut self) -> Stitched {
        let (rows, cols) = (self.dims.rows, self.dims.cols);

        for row in 0..rows {
            for col in 0..cols {
                let block = if col == 0 {
                    self.west_edge_cell(row)
                } else {
                    self.eastward_cell(row, col)
                };
                self.blocks.push(block);
            }
        }

        // The loop only back-fills rows below the one being started.
        if self.west.is_some() && rows > 0 {
            self.backfill_west_edge(rows - 1);
        }
        self.stitch_east();
        self.stitch_north();

        trace!(
            "Built chunk {} with {} remote links",
            self.coord,
            self.remote.len()
        );
        Stitched {
            grid: ChunkGrid::from_blocks(self.coord, self.dims, self.blocks),
            remote: self.remote,
        }
    }

    fn here(&self, row: usize, col: usize) -> BlockRef {
        BlockRef::new(self.coord, row, col)
    }

    fn local_index(&self, target: BlockRef) -> usize {
        target.row * self.dims.cols + target.col
    }

    /// First column. Row 0 is seeded from a neighbor when one exists.
    fn west_edge_cell(&mut self, row: usize) -> Block {
        let (rows, cols) = (self.dims.rows, self.dims.cols);
        let at = self.here(row, 0);

        if row == 0 {
            let mut block = match (self.west, self.south) {
                (Some(west), Some(south)) => {
                    let corner_w = west.block_ref(0, cols - 1);
                    let corner_s = south.block_ref(rows - 1, 0);
                    self.link_remote(corner_w, Direction::SE, corner_s);
                    self.extrude(&west[(0, cols - 1)], corner_w, Direction::E, at)
                }
                (Some(west), None) => {
                    self.extrude(&west[(0, cols - 1)], west.block_ref(0, cols - 1), Direction::E, at)
                }
                (None, Some(south)) => {
                    self.extrude(&south[(rows - 1, 0)], south.block_ref(rows - 1, 0), Direction::N, at)
                }
                (None, None) => {
                    let (width, height) = self.block_size;
                    Block::origin(width, height, self.worldgen.base_color)
                }
            };
            block.position = IVec2::ZERO;
            self.link_below(&mut block, 0, 0);
            return block;
        }

        if self.west.is_some() {
            self.backfill_west_edge(row - 1);
        }

        let below = self.blocks[self.local_index(self.here(row - 1, 0))].clone();
        let mut block = self.extrude(&below, self.here(row - 1, 0), Direction::N, at);
        self.link_below(&mut block, row, 0);

        if let Some(west) = self.west {
            self.attach(&mut block, at, Direction::W, west.block_ref(row, cols - 1));
        }
        block
    }

    fn eastward_cell(&mut self, row: usize, col: usize) -> Block {
        let at = self.here(row, col);
        let previous = self.here(row, col - 1);
        let source = self.blocks[self.local_index(previous)].clone();
        let mut block = self.extrude(&source, previous, Direction::E, at);
        self.link_below(&mut block, row, col);
        block
    }

    /// Links `block` to the south-west, south and south-east cells beneath
    /// it: this chunk's previous row, or the south chunk's top row for row 0.
    fn link_below(&mut self, block: &mut Block, row: usize, col: usize) {
        let cols = self.dims.cols;
        let at = self.here(row, col);
        let below_row = |grid_row: usize, c: usize, grid: Option<&ChunkGrid>| match grid {
            Some(grid) => grid.block_ref(grid_row, c),
            None => BlockRef::new(at.chunk, grid_row, c),
        };

        let (target_row, grid) = if row > 0 {
            (row - 1, None)
        } else if let Some(south) = self.south {
            (self.dims.rows - 1, Some(south))
        } else {
            return;
        };

        if col > 0 {
            self.attach(block, at, Direction::SW, below_row(target_row, col - 1, grid));
        }
        self.attach(block, at, Direction::S, below_row(target_row, col, grid));
        if col + 1 < cols {
            self.attach(block, at, Direction::SE, below_row(target_row, col + 1, grid));
        }
    }

    /// Links the first-column block of `row` to the west chunk's last column.
    fn backfill_west_edge(&mut self, row: usize) {
        let Some(west) = self.west else {
            return;
        };
        let (rows, cols) = (self.dims.rows, self.dims.cols);
        let at = self.here(row, 0);

        let mut targets = vec![(Direction::W, west.block_ref(row, cols - 1))];
        if row + 1 < rows {
            targets.push((Direction::NW, west.block_ref(row + 1, cols - 1)));
        }
        if row > 0 {
            targets.push((Direction::SW, west.block_ref(row - 1, cols - 1)));
        }

        let index = self.local_index(at);
        for (dir, target) in targets {
            self.blocks[index].link(dir, target);
            self.link_remote(target, dir.opposite(), at);
        }
    }

    fn stitch_east(&mut self) {
        let Some(east) = self.east else {
            return;
        };
        let (rows, cols) = (self.dims.rows, self.dims.cols);
        for row in 0..rows {
            let at = self.here(row, cols - 1);
            let index = self.local_index(at);
            let mut targets = vec![(Direction::E, east.block_ref(row, 0))];
            if row + 1 < rows {
                targets.push((Direction::NE, east.block_ref(row + 1, 0)));
            }
            if row > 0 {
                targets.push((Direction::SE, east.block_ref(row - 1, 0)));
            }
            for (dir, target) in targets {
                self.blocks[index].link(dir, target);
                self.link_remote(target, dir.opposite(), at);
            }
        }
    }

    fn stitch_north(&mut self) {
        let Some(north) = self.north else {
            return;
        };
        let (rows, cols) = (self.dims.rows, self.dims.cols);
        for col in 0..cols {
            let at = self.here(rows - 1, col);
            let index = self.local_index(at);
            let mut targets = vec![(Direction::N, north.block_ref(0, col))];
            if col > 0 {
                targets.push((Direction::NW, north.block_ref(0, col - 1)));
            }
            if col + 1 < cols {
                targets.push((Direction::NE, north.block_ref(0, col + 1)));
            }
            for (dir, target) in targets {
                self.blocks[index].link(dir, target);
                self.link_remote(target, dir.opposite(), at);
            }
        }
    }

    /// Derives a block from `source` and wires the source side of the link.
    fn extrude(&mut self, source: &Block, source_ref: BlockRef, dir: Direction, at: BlockRef) -> Block {
        let mut block = source.extrude(source_ref, dir);
        self.back_link(source_ref, dir, at);
        self.weather(&mut block);
        block
    }

    /// Links a block that is not yet in the grid to `target`, both ways.
    fn attach(&mut self, block: &mut Block, at: BlockRef, dir: Direction, target: BlockRef) {
        block.link(dir, target);
        self.back_link(target, dir.opposite(), at);
    }

    fn back_link(&mut self, from: BlockRef, dir: Direction, to: BlockRef) {
        if from.chunk == self.coord {
            let index = self.local_index(from);
            self.blocks[index].link(dir, to);
        } else {
            self.link_remote(from, dir, to);
        }
    }

    fn link_remote(&mut self, from: BlockRef, dir: Direction, to: BlockRef) {
        self.remote.push(RemoteLink { from, dir, to });
        if to.chunk != self.coord {
            // Both ends live in neighbors, record the reverse as well.
            self.remote.push(RemoteLink {
                from: to,
                dir: dir.opposite(),
                to: from,
            });
        }
    }

    /// Drifts an extruded block's color and rolls its collidability.
    fn weather(&mut self, block: &mut Block) {
        let jitter = self.worldgen.color_jitter as i16;
        for channel in &mut block.color {
            let drift = self.rng.gen_range(-jitter..=jitter);
            *channel = (*channel as i16 + drift).clamp(0, 255) as u8;
        }
        let chance = self.worldgen.wall_chance;
        // Validated configs never get here with NaN, but gen_bool panics on it.
        let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
        block.collidable = self.rng.gen_bool(chance);
    }
}
