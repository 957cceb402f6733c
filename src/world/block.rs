use crate::utils::math::Rect;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::direction::Direction;
use crate::world::storage::BlockRecord;
use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

pub type Rgb = [u8; 3];

/// Handle to a block cell of some chunk.
///
/// Links are stored as handles rather than references so a link can cross
/// into a neighboring chunk without either chunk owning the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRef {
    pub chunk: ChunkCoord,
    pub row: usize,
    pub col: usize,
}

impl BlockRef {
    pub fn new(chunk: ChunkCoord, row: usize, col: usize) -> Self {
        Self { chunk, row, col }
    }
}

/// The eight directional neighbor links of a block, indexed by `Direction`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Links([Option<BlockRef>; 8]);

impl Links {
    pub fn get(&self, dir: Direction) -> Option<BlockRef> {
        self.0[dir.index()]
    }

    pub fn set(&mut self, dir: Direction, target: Option<BlockRef>) {
        self.0[dir.index()] = target;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, BlockRef)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.get(dir).map(|target| (dir, target)))
    }

    pub fn count(&self) -> usize {
        self.0.iter().flatten().count()
    }

    pub fn clear(&mut self) {
        self.0 = [None; 8];
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Chunk-local tile position: x is the column, y the row (row 0 is south).
    pub position: IVec2,
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
    pub collidable: bool,
    links: Links,
}

impl Block {
    pub fn new(position: IVec2, width: u32, height: u32, color: Rgb) -> Self {
        Self {
            position,
            width,
            height,
            color,
            collidable: false,
            links: Links::default(),
        }
    }

    pub fn origin(width: u32, height: u32, color: Rgb) -> Self {
        Self::new(IVec2::ZERO, width, height, color)
    }

    /// Derives the block adjacent to this one in `dir`.
    ///
    /// The new block copies size, color and collidability, and its only
    /// link points back at `source` (the handle of `self`). Wiring the
    /// source side is left to the caller, who knows the new block's handle.
    pub fn extrude(&self, source: BlockRef, dir: Direction) -> Block {
        let mut block = Block {
            position: self.position + dir.delta(),
            width: self.width,
            height: self.height,
            color: self.color,
            collidable: self.collidable,
            links: Links::default(),
        };
        block.link(dir.opposite(), source);
        block
    }

    pub fn neighbor(&self, dir: Direction) -> Option<BlockRef> {
        self.links.get(dir)
    }

    pub fn link(&mut self, dir: Direction, target: BlockRef) {
        self.links.set(dir, Some(target));
    }

    pub fn unlink(&mut self, dir: Direction) -> Option<BlockRef> {
        let previous = self.links.get(dir);
        self.links.set(dir, None);
        previous
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn clear_links(&mut self) {
        self.links.clear();
    }

    /// Pixel rectangle covered by this block inside its chunk.
    pub fn pixel_rect(&self) -> Rect {
        let size = Vec2::new(self.width as f32, self.height as f32);
        Rect::from_origin_size(self.position.as_vec2() * size, size)
    }

    pub fn from_record(record: &BlockRecord) -> Self {
        Self {
            position: IVec2::new(record.x, record.y),
            width: record.width,
            height: record.height,
            color: record.color,
            collidable: record.collidable,
            links: Links::default(),
        }
    }

    pub fn to_record(&self, chunk: ChunkCoord) -> BlockRecord {
        BlockRecord {
            chunk,
            x: self.position.x,
            y: self.position.y,
            width: self.width,
            height: self.height,
            color: self.color,
            collidable: self.collidable,
        }
    }
}
