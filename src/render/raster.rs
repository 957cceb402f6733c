use crate::utils::error::Result;
use crate::world::chunk::Chunk;
use image::{Rgb, RgbImage};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Turns a chunk's block grid into its background bitmap.
pub trait ChunkRasterizer {
    fn rasterize(&self, chunk: &Chunk) -> Result<RgbImage>;

    /// Where the background of `chunk` lives.
    fn background_path(&self, chunk: &Chunk) -> PathBuf;

    fn write(&self, image: &RgbImage, path: &Path) -> Result<()>;

    /// Renders the background only when no bitmap exists yet. Returns the
    /// path of a freshly written image.
    fn ensure_background(&self, chunk: &Chunk) -> Result<Option<PathBuf>> {
        let path = self.background_path(chunk);
        if path.exists() {
            return Ok(None);
        }
        let image = self.rasterize(chunk)?;
        self.write(&image, &path)?;
        Ok(Some(path))
    }
}

/// Writes `<chunk name>.png` files into a directory.
pub struct PngRasterizer {
    dir: PathBuf,
}

impl PngRasterizer {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ChunkRasterizer for PngRasterizer {
    fn rasterize(&self, chunk: &Chunk) -> Result<RgbImage> {
        let (width, height) = chunk.pixel_size();
        let mut image = RgbImage::new(width, height);

        for block in chunk.grid().blocks() {
            let rect = block.pixel_rect();
            let x0 = rect.min.x.max(0.0) as u32;
            let x1 = (rect.max.x as u32).min(width);
            let y0 = rect.min.y.max(0.0) as u32;
            let y1 = (rect.max.y as u32).min(height);
            for y in y0..y1 {
                // Image rows grow downwards, chunk rows grow upwards.
                let image_y = height - 1 - y;
                for x in x0..x1 {
                    image.put_pixel(x, image_y, Rgb(block.color));
                }
            }
        }

        debug!("Rasterized chunk {} at {}x{}", chunk.coord(), width, height);
        Ok(image)
    }

    fn background_path(&self, chunk: &Chunk) -> PathBuf {
        self.dir.join(chunk.img_file_name())
    }

    fn write(&self, image: &RgbImage, path: &Path) -> Result<()> {
        image.save(path)?;
        info!("Wrote chunk background {}", path.display());
        Ok(())
    }
}
