use crate::detection::domain::image_orientation::ImageOrientation;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Orientation hint for a portrait front-facing camera with a mirrored preview.
pub const FRONT_CAMERA_ORIENTATION: ImageOrientation = ImageOrientation::LeftMirrored;

pub const WORKER_THREAD_NAME: &str = "frame-dispatcher";

/// Progress is logged every N frames by the stdout logger.
pub const DEFAULT_LOG_EVERY: usize = 30;
