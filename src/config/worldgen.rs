use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Color of the very first block of a world.
    pub base_color: [u8; 3],
    /// Maximum per-channel drift between a block and the block it was extruded from.
    pub color_jitter: u8,
    /// Probability that a generated block is collidable.
    pub wall_chance: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            base_color: [96, 160, 72],
            color_jitter: 6,
            wall_chance: 0.08,
        }
    }
}

impl WorldGenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN fails both comparisons.
        if !(0.0..=1.0).contains(&self.wall_chance) {
            return Err(ConfigError::InvalidWallChance(self.wall_chance));
        }
        Ok(())
    }
}
