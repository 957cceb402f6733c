use crate::utils::error::Result;
use crate::world::cache::ChunkCache;
use crate::world::chunk::Chunk;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::direction::Direction;
use log::debug;

/// Lazy access to the eight chunks around a chunk.
///
/// The first request in a direction materializes the neighbor (loading or
/// generating it) and remembers its coordinate on the origin chunk. The memo
/// is never invalidated; an evicted neighbor is simply resolved again.
impl ChunkCache {
    pub fn neighbor(&mut self, of: ChunkCoord, dir: Direction) -> Result<&Chunk> {
        let memo = self.resolve_or_create(of)?.memoized_neighbor(dir);
        let target = match memo {
            Some(target) => target,
            None => {
                let target = of.offset(dir);
                debug!("Loading chunk {}", target);
                if let Some(origin) = self.get_mut(of) {
                    origin.memoize_neighbor(dir, target);
                }
                target
            }
        };
        self.resolve_or_create(target)
    }

    /// All eight neighbors, clockwise from north.
    pub fn neighbors(&mut self, of: ChunkCoord) -> Result<[ChunkCoord; 8]> {
        let mut coords = of.neighbors();
        for (slot, dir) in coords.iter_mut().zip(Direction::ALL) {
            *slot = self.neighbor(of, dir)?.coord();
        }
        Ok(coords)
    }

    pub fn north(&mut self, of: ChunkCoord) -> Result<&Chunk> {
        self.neighbor(of, Direction::N)
    }

    pub fn north_east(&mut self, of: ChunkCoord) -> Result<&Chunk> {
        self.neighbor(of, Direction::NE)
    }

    pub fn east(&mut self, of: ChunkCoord) -> Result<&Chunk> {
        self.neighbor(of, Direction::E)
    }

    pub fn south_east(&mut self, of: ChunkCoord) -> Result<&Chunk> {
        self.neighbor(of, Direction::SE)
    }

    pub fn south(&mut self, of: ChunkCoord) -> Result<&Chunk> {
        self.neighbor(of, Direction::S)
    }

    pub fn south_west(&mut self, of: ChunkCoord) -> Result<&Chunk> {
        self.neighbor(of, Direction::SW)
    }

    pub fn west(&mut self, of: ChunkCoord) -> Result<&Chunk> {
        self.neighbor(of, Direction::W)
    }

    pub fn north_west(&mut self, of: ChunkCoord) -> Result<&Chunk> {
        self.neighbor(of, Direction::NW)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::WorldConfig;
    use crate::world::cache::ChunkCache;
    use crate::world::chunk_coord::ChunkCoord;
    use crate::world::direction::Direction;
    use crate::world::storage::MemoryChunkStore;

    fn cache() -> ChunkCache {
        let config = WorldConfig {
            window_width: 20,
            window_height: 20,
            block_width: 10,
            block_height: 10,
            ..WorldConfig::default()
        };
        ChunkCache::new(config, MemoryChunkStore::new()).unwrap()
    }

    #[test]
    fn first_access_creates_and_memoizes() {
        let mut cache = cache();
        let origin = ChunkCoord::new(0, 0);

        assert_eq!(cache.north(origin).unwrap().coord(), ChunkCoord::new(0, 1));
        assert_eq!(
            cache.get(origin).unwrap().memoized_neighbor(Direction::N),
            Some(ChunkCoord::new(0, 1))
        );
        assert!(cache.get(origin).unwrap().memoized_neighbor(Direction::S).is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicted_neighbor_is_resolved_again() {
        let mut cache = cache();
        let origin = ChunkCoord::new(0, 0);
        cache.east(origin).unwrap();
        cache.evict(ChunkCoord::new(1, 0));

        assert_eq!(cache.east(origin).unwrap().coord(), ChunkCoord::new(1, 0));
        assert!(cache.contains(ChunkCoord::new(1, 0)));
    }

    #[test]
    fn all_eight_neighbors() {
        let mut cache = cache();
        let origin = ChunkCoord::new(2, 2);
        let coords = cache.neighbors(origin).unwrap();

        assert_eq!(coords, origin.neighbors());
        assert_eq!(cache.len(), 9);
        assert_eq!(cache.south_west(origin).unwrap().coord(), ChunkCoord::new(1, 1));
        assert_eq!(cache.north_west(origin).unwrap().coord(), ChunkCoord::new(1, 3));
    }
}
