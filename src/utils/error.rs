use crate::world::chunk_coord::ChunkCoord;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Window {axis} of {window}px is not a multiple of the block {axis} ({block}px)")]
    NotAMultiple {
        axis: &'static str,
        window: u32,
        block: u32,
    },

    #[error("Block {axis} must be between 1 and the window {axis} ({window}px), got {block}px")]
    InvalidBlockSize {
        axis: &'static str,
        window: u32,
        block: u32,
    },

    #[error("Wall chance must be a probability between 0 and 1, got {0}")]
    InvalidWallChance(f64),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("No persisted grid for chunk {0}")]
    MissingPersistedGrid(ChunkCoord),

    #[error("Unrecognized direction token: {0:?}")]
    DirectionMismatch(String),

    #[error("Chunk {0} is already being built")]
    ReentrantBuild(ChunkCoord),

    #[error("Malformed record for chunk {coord}: {reason}")]
    MalformedRecord { coord: ChunkCoord, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Rasterization error: {0}")]
    Raster(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, WorldError>;
