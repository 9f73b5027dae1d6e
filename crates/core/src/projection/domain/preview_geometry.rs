//! Live geometry of the on-screen preview and the device-to-layer mapping.
//!
//! Device points are normalized to the sensor's native orientation. They are
//! rotated into display orientation, optionally mirrored, then placed into
//! the layer according to the video gravity.

use serde::{Deserialize, Serialize};

use crate::projection::domain::coordinate_transform::LayerTransform;
use crate::shared::geometry::{Point, Rect, Size};

/// How the video is scaled into the layer bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoGravity {
    /// Stretch to the bounds, ignoring aspect ratio.
    Resize,
    /// Fit inside the bounds, letterboxed.
    ResizeAspect,
    /// Fill the bounds, cropping the overflow.
    #[default]
    ResizeAspectFill,
}

/// Clockwise rotation from sensor orientation to display orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    #[serde(rename = "0")]
    R0,
    #[serde(rename = "90")]
    R90,
    #[serde(rename = "180")]
    R180,
    #[serde(rename = "270")]
    R270,
}

impl Rotation {
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::R0),
            90 => Some(Rotation::R90),
            180 => Some(Rotation::R180),
            270 => Some(Rotation::R270),
            _ => None,
        }
    }

    fn apply(self, p: Point) -> Point {
        match self {
            Rotation::R0 => p,
            Rotation::R90 => Point::new(1.0 - p.y, p.x),
            Rotation::R180 => Point::new(1.0 - p.x, 1.0 - p.y),
            Rotation::R270 => Point::new(p.y, 1.0 - p.x),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewGeometry {
    /// Layer frame in pixels.
    pub layer_bounds: Rect,
    /// Video dimensions in display orientation.
    pub video_size: Size,
    pub gravity: VideoGravity,
    pub rotation: Rotation,
    pub mirrored: bool,
}

impl PreviewGeometry {
    pub fn new(layer_bounds: Rect, video_size: Size) -> Self {
        Self {
            layer_bounds,
            video_size,
            gravity: VideoGravity::default(),
            rotation: Rotation::default(),
            mirrored: false,
        }
    }

    pub fn with_gravity(mut self, gravity: VideoGravity) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    /// Rectangle the full video occupies in layer space. May extend past
    /// the layer bounds under aspect-fill.
    pub fn video_rect(&self) -> Rect {
        let bounds = self.layer_bounds;
        let (bw, bh) = (bounds.size.width, bounds.size.height);
        let (vw, vh) = (self.video_size.width, self.video_size.height);

        let (dw, dh) = match self.gravity {
            VideoGravity::Resize => (bw, bh),
            VideoGravity::ResizeAspect => {
                let scale = (bw / vw).min(bh / vh);
                (vw * scale, vh * scale)
            }
            VideoGravity::ResizeAspectFill => {
                let scale = (bw / vw).max(bh / vh);
                (vw * scale, vh * scale)
            }
        };

        Rect::new(
            bounds.origin.x + (bw - dw) / 2.0,
            bounds.origin.y + (bh - dh) / 2.0,
            dw,
            dh,
        )
    }
}

impl LayerTransform for PreviewGeometry {
    fn layer_point(&self, device_point: Point) -> Point {
        if self.video_size.is_degenerate() || self.layer_bounds.size.is_degenerate() {
            return self.layer_bounds.origin;
        }

        let mut p = self.rotation.apply(device_point);
        if self.mirrored {
            p.x = 1.0 - p.x;
        }

        let video = self.video_rect();
        Point::new(
            video.origin.x + p.x * video.size.width,
            video.origin.y + p.y * video.size.height,
        )
    }
}
