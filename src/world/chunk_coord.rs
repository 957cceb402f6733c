use crate::world::direction::Direction;
use glam::IVec2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord(pub IVec2);

impl Serialize for ChunkCoord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.0.x, self.0.y).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChunkCoord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (x, y) = <(i32, i32)>::deserialize(deserializer)?;
        Ok(ChunkCoord(IVec2::new(x, y)))
    }
}

impl PartialOrd for ChunkCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChunkCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.0.x.cmp(&other.0.x) {
            Ordering::Equal => self.0.y.cmp(&other.0.y),
            ord => ord,
        }
    }
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }

    /// Coordinate of the chunk adjacent in `dir`.
    pub fn offset(&self, dir: Direction) -> Self {
        Self(self.0 + dir.delta())
    }

    pub fn neighbors(&self) -> [Self; 8] {
        Direction::ALL.map(|dir| self.offset(dir))
    }

    /// Seed mixing used for per-chunk random streams.
    pub fn seed(&self, world_seed: u64) -> u64 {
        world_seed
            .wrapping_add((self.0.x as i64 as u64).wrapping_mul(341873128712))
            .wrapping_add((self.0.y as i64 as u64).wrapping_mul(132897987541))
    }

    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(format!("chunk_{}_{}.bin", self.0.x, self.0.y))
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let file_name = path
            .file_name()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "Invalid path"))?
            .to_str()
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "Invalid filename")
            })?;

        if !file_name.starts_with("chunk_") || !file_name.ends_with(".bin") {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Invalid chunk file format",
            ));
        }

        let coords = file_name[6..file_name.len() - 4]
            .split('_')
            .map(|s| s.parse::<i32>())
            .collect::<Result<Vec<i32>, _>>()
            .map_err(|_| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "Invalid coordinates")
            })?;

        if coords.len() != 2 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Invalid coordinate count",
            ));
        }

        Ok(Self::new(coords[0], coords[1]))
    }

    pub fn manhattan_distance(&self, other: &Self) -> i32 {
        (self.0.x - other.0.x).abs() + (self.0.y - other.0.y).abs()
    }
}

impl Display for ChunkCoord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

impl From<IVec2> for ChunkCoord {
    fn from(vec: IVec2) -> Self {
        Self(vec)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<ChunkCoord> for IVec2 {
    fn from(coord: ChunkCoord) -> Self {
        coord.0
    }
}
