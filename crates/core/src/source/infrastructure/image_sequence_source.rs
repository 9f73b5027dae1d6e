use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::{Frame, PixelBuffer};
use crate::source::domain::frame_source::{FrameSource, SourceError, SourceMetadata};

/// Replays a directory of still images as a camera feed.
///
/// Files are ordered by name. Each is decoded to RGB8 on demand; a file that
/// fails to decode becomes an unreadable frame rather than an error.
pub struct ImageSequenceSource {
    dir: PathBuf,
    files: Vec<PathBuf>,
}

impl ImageSequenceSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
        }
    }

    fn list_images(&self) -> Result<Vec<PathBuf>, SourceError> {
        let io_err = |source| SourceError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && is_image(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self) -> Result<SourceMetadata, SourceError> {
        if !self.dir.is_dir() {
            return Err(SourceError::NotFound(self.dir.clone()));
        }
        self.files = self.list_images()?;
        if self.files.is_empty() {
            return Err(SourceError::Empty(self.dir.clone()));
        }

        let (width, height) = self
            .files
            .iter()
            .find_map(|path| image::image_dimensions(path).ok())
            .unwrap_or((0, 0));

        log::info!(
            "Opened {} frames ({width}x{height}) from {}",
            self.files.len(),
            self.dir.display()
        );

        Ok(SourceMetadata {
            width,
            height,
            total_frames: self.files.len(),
        })
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = Frame> + '_> {
        Box::new(
            self.files
                .iter()
                .enumerate()
                .map(|(index, path)| decode_frame(path, index)),
        )
    }
}

fn decode_frame(path: &Path, index: usize) -> Frame {
    match image::open(path) {
        Ok(img) => {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            Frame::new(PixelBuffer::new(rgb.into_raw(), width, height, 3, index))
        }
        Err(e) => {
            log::debug!("Could not decode {}: {e}", path.display());
            Frame::unreadable(index)
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
