use std::path::PathBuf;

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("frame source not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to list {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("frame source {0} has no frames")]
    Empty(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceMetadata {
    pub width: u32,
    pub height: u32,
    pub total_frames: usize,
}

/// Camera-like producer of frames.
///
/// Frames come out in capture order. A frame whose pixels cannot be read is
/// still yielded (without a buffer) so consumers see the gap.
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<SourceMetadata, SourceError>;

    fn frames(&mut self) -> Box<dyn Iterator<Item = Frame> + '_>;
}
