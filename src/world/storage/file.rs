use crate::utils::error::StorageError;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::storage::{ChunkRecord, ChunkStore};
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One bincode file per chunk under `base_path`.
pub struct FileChunkStore {
    base_path: PathBuf,
}

impl FileChunkStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn chunk_path(&self, coord: ChunkCoord) -> PathBuf {
        self.base_path.join(coord.to_path())
    }

    /// Coordinates of every chunk file currently on disk.
    pub fn stored_coords(&self) -> Result<Vec<ChunkCoord>, StorageError> {
        let mut coords = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            match ChunkCoord::from_path(&path) {
                Ok(coord) => coords.push(coord),
                Err(_) => debug!("Skipping non-chunk file {}", path.display()),
            }
        }
        coords.sort();
        Ok(coords)
    }

    pub fn save_to_writer(record: &ChunkRecord, mut writer: impl io::Write) -> Result<(), StorageError> {
        bincode::serialize_into(&mut writer, record)?;
        Ok(())
    }

    pub fn load_from_reader(mut reader: impl io::Read) -> Result<ChunkRecord, StorageError> {
        Ok(bincode::deserialize_from(&mut reader)?)
    }
}

impl ChunkStore for FileChunkStore {
    fn load(&self, coord: ChunkCoord) -> Result<Option<ChunkRecord>, StorageError> {
        let path = self.chunk_path(coord);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record = Self::load_from_reader(BufReader::new(file))?;
        if record.coord() != coord {
            warn!(
                "Chunk file {} holds chunk {}, expected {}",
                path.display(),
                record.coord(),
                coord
            );
        }
        Ok(Some(record))
    }

    fn save(&mut self, record: &ChunkRecord) -> Result<(), StorageError> {
        // The whole record is written aside and renamed into place, so a chunk
        // file never exists without its blocks.
        let mut tmp = NamedTempFile::new_in(&self.base_path)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            Self::save_to_writer(record, &mut writer)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(self.chunk_path(record.coord()))
            .map_err(|e| StorageError::Io(e.error))?;
        debug!("Saved chunk {} to {}", record.coord(), self.base_path.display());
        Ok(())
    }

    fn contains(&self, coord: ChunkCoord) -> Result<bool, StorageError> {
        Ok(self.chunk_path(coord).is_file())
    }
}
