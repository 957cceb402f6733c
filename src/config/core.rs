use crate::config::chunksys::ChunkSysConfig;
use crate::config::worldgen::WorldGenConfig;
use crate::utils::error::ConfigError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rows and columns of blocks in every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

impl GridDims {
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // A chunk covers exactly one window
    pub window_width: u32,
    pub window_height: u32,
    pub block_width: u32,
    pub block_height: u32,

    pub world_seed: u64,
    pub log_level: String,

    pub chunksys: ChunkSysConfig,
    pub worldgen: WorldGenConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            block_width: 50,
            block_height: 50,
            world_seed: 12345,
            log_level: "info".to_string(),
            chunksys: ChunkSysConfig::default(),
            worldgen: WorldGenConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Block grid shape implied by the window and block sizes.
    ///
    /// Window dimensions must be exact multiples of the block dimensions.
    pub fn grid_dims(&self) -> std::result::Result<GridDims, ConfigError> {
        let rows = Self::cells("height", self.window_height, self.block_height)?;
        let cols = Self::cells("width", self.window_width, self.block_width)?;
        Ok(GridDims { rows, cols })
    }

    /// Checks every setting generation depends on and returns the grid shape.
    pub fn validate(&self) -> std::result::Result<GridDims, ConfigError> {
        self.worldgen.validate()?;
        self.grid_dims()
    }

    fn cells(axis: &'static str, window: u32, block: u32) -> std::result::Result<usize, ConfigError> {
        if block == 0 || block > window {
            return Err(ConfigError::InvalidBlockSize {
                axis,
                window,
                block,
            });
        }
        if window % block != 0 {
            return Err(ConfigError::NotAMultiple {
                axis,
                window,
                block,
            });
        }
        Ok((window / block) as usize)
    }

    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate().context("Invalid world settings")?;
        Ok(config)
    }

    /// Loads `path`, writing the defaults there first if it does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        if !path.exists() {
            let default_config = Self::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, toml_content).context("Failed to write default config")?;
            return Ok(default_config);
        }

        Self::load(path)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "MetroManDevTeam", "chunkworld")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join("world.toml"))
}
