use crate::config::GridDims;
use crate::utils::error::{Result, WorldError};
use crate::world::block::{Block, BlockRef};
use crate::world::chunk_coord::ChunkCoord;
use crate::world::direction::Direction;
use crate::world::storage::BlockRecord;
use log::{debug, warn};
use std::collections::HashSet;
use std::ops::{Index, IndexMut};

/// Row-major block grid of a single chunk. Row 0 is the southern edge.
#[derive(Debug, Clone)]
pub struct ChunkGrid {
    coord: ChunkCoord,
    dims: GridDims,
    blocks: Vec<Block>,
}

impl ChunkGrid {
    /// Wraps blocks already laid out row-major.
    pub(crate) fn from_blocks(coord: ChunkCoord, dims: GridDims, blocks: Vec<Block>) -> Self {
        debug_assert_eq!(blocks.len(), dims.len());
        Self {
            coord,
            dims,
            blocks,
        }
    }

    /// Rebuilds a grid from persisted records and re-links it.
    ///
    /// Records may arrive in any order. Only intra-chunk links are restored.
    pub fn from_records(coord: ChunkCoord, dims: GridDims, records: &[BlockRecord]) -> Result<Self> {
        if records.len() != dims.len() {
            return Err(WorldError::MalformedRecord {
                coord,
                reason: format!(
                    "expected {}x{} = {} blocks, found {}",
                    dims.rows,
                    dims.cols,
                    dims.len(),
                    records.len()
                ),
            });
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            let in_range = record.x >= 0
                && record.y >= 0
                && (record.x as usize) < dims.cols
                && (record.y as usize) < dims.rows;
            if !in_range || !seen.insert((record.y, record.x)) {
                return Err(WorldError::MalformedRecord {
                    coord,
                    reason: format!("block at ({}, {}) is out of range or duplicated", record.x, record.y),
                });
            }
            if record.chunk != coord {
                warn!(
                    "Block ({}, {}) of chunk {} is keyed to chunk {}",
                    record.x, record.y, coord, record.chunk
                );
            }
        }

        let mut blocks: Vec<Block> = records.iter().map(Block::from_record).collect();
        blocks.sort_by_key(|block| (block.position.y, block.position.x));

        let mut grid = Self::from_blocks(coord, dims, blocks);
        grid.link();
        debug!("Hydrated {} blocks for chunk {}", grid.len(), coord);
        Ok(grid)
    }

    pub fn to_records(&self) -> Vec<BlockRecord> {
        self.blocks.iter().map(|block| block.to_record(self.coord)).collect()
    }

    /// Recomputes every intra-chunk link from scratch.
    ///
    /// Each cell links to the already-visited cells south-west, south,
    /// south-east and west of it; the reverse links complete the other four
    /// directions. Links into other chunks are dropped.
    pub fn link(&mut self) {
        for block in &mut self.blocks {
            block.clear_links();
        }

        let (rows, cols) = (self.dims.rows, self.dims.cols);
        for row in 0..rows {
            for col in 0..cols {
                if row > 0 {
                    self.connect((row, col), Direction::S, (row - 1, col));
                    if col > 0 {
                        self.connect((row, col), Direction::SW, (row - 1, col - 1));
                    }
                    if col + 1 < cols {
                        self.connect((row, col), Direction::SE, (row - 1, col + 1));
                    }
                }
                if col > 0 {
                    self.connect((row, col), Direction::W, (row, col - 1));
                }
            }
        }
    }

    /// Links two cells of this grid in both directions.
    pub fn connect(&mut self, from: (usize, usize), dir: Direction, to: (usize, usize)) {
        let from_ref = self.block_ref(from.0, from.1);
        let to_ref = self.block_ref(to.0, to.1);
        self[from].link(dir, to_ref);
        self[to].link(dir.opposite(), from_ref);
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block_ref(&self, row: usize, col: usize) -> BlockRef {
        BlockRef::new(self.coord, row, col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Block> {
        if row < self.dims.rows && col < self.dims.cols {
            self.blocks.get(row * self.dims.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Block> {
        if row < self.dims.rows && col < self.dims.cols {
            self.blocks.get_mut(row * self.dims.cols + col)
        } else {
            None
        }
    }

    /// Resolves a handle that points into this grid.
    pub fn resolve(&self, target: BlockRef) -> Option<&Block> {
        if target.chunk == self.coord {
            self.get(target.row, target.col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[Block] {
        let start = row * self.dims.cols;
        &self.blocks[start..start + self.dims.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[Block]> {
        self.blocks.chunks(self.dims.cols.max(1))
    }

    /// Blocks in row-major order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Handles of every block together with the block.
    pub fn cells(&self) -> impl Iterator<Item = (BlockRef, &Block)> {
        let (coord, cols) = (self.coord, self.dims.cols);
        self.blocks
            .iter()
            .enumerate()
            .map(move |(i, block)| (BlockRef::new(coord, i / cols, i % cols), block))
    }
}

impl Index<(usize, usize)> for ChunkGrid {
    type Output = Block;

    fn index(&self, (row, col): (usize, usize)) -> &Block {
        assert!(col < self.dims.cols, "column {col} out of range");
        &self.blocks[row * self.dims.cols + col]
    }
}

impl IndexMut<(usize, usize)> for ChunkGrid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Block {
        assert!(col < self.dims.cols, "column {col} out of range");
        &mut self.blocks[row * self.dims.cols + col]
    }
}
