use crate::detection::domain::face_observation::FaceObservation;
use crate::detection::domain::image_orientation::ImageOrientation;
use crate::shared::frame::PixelBuffer;

pub type DetectionError = Box<dyn std::error::Error + Send + Sync>;

/// Domain interface for a face-landmark backend.
///
/// An empty result is a normal outcome (no face in view). `Err` is reserved
/// for failures of the call itself. Implementations may be stateful,
/// hence `&mut self`; callers guarantee at most one call in flight.
pub trait LandmarkDetector: Send {
    fn detect(
        &mut self,
        buffer: &PixelBuffer,
        orientation: ImageOrientation,
    ) -> Result<Vec<FaceObservation>, DetectionError>;
}
