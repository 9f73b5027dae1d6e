use crate::detection::domain::face_observation::{FaceLandmarks, FaceObservation, LandmarkGroup};
use crate::overlay::domain::face_geometry::GeometryUpdate;
use crate::overlay::domain::overlay_sink::{OverlayMessage, OverlaySink};
use crate::projection::domain::coordinate_transform::{denormalize, LayerTransform};
use crate::projection::infrastructure::shared_preview_geometry::SharedPreviewGeometry;
use crate::shared::geometry::{Point, Rect};

/// Converts detector output into layer-space geometry and publishes it.
///
/// Only the first observation of a result is used. Every call ends with
/// exactly one redraw request, whichever path it takes.
pub struct LandmarkProjector {
    preview: SharedPreviewGeometry,
    sink: Box<dyn OverlaySink>,
}

impl LandmarkProjector {
    pub fn new(preview: SharedPreviewGeometry, sink: Box<dyn OverlaySink>) -> Self {
        Self { preview, sink }
    }

    pub fn on_detection_complete(&mut self, results: &[FaceObservation]) {
        let mut guard = RedrawGuard {
            sink: self.sink.as_mut(),
        };

        let Some(first) = results.first() else {
            guard.publish(OverlayMessage::Clear);
            return;
        };

        let transform = self.preview.snapshot();
        let update = project_observation(first, &transform);
        guard.publish(OverlayMessage::Update(update));
    }
}

/// Sends `Redraw` when dropped.
struct RedrawGuard<'a> {
    sink: &'a mut dyn OverlaySink,
}

impl RedrawGuard<'_> {
    fn publish(&mut self, message: OverlayMessage) {
        self.sink.publish(message);
    }
}

impl Drop for RedrawGuard<'_> {
    fn drop(&mut self) {
        self.sink.publish(OverlayMessage::Redraw);
    }
}

/// Projects one observation into layer space.
///
/// The box corners are mapped independently and the rectangle rebuilt from
/// them. Landmark points are first re-based from the box onto the image,
/// then mapped. Groups absent or empty in the observation stay `None`.
pub fn project_observation(
    observation: &FaceObservation,
    transform: &impl LayerTransform,
) -> GeometryUpdate {
    let bbox = observation.bounding_box;
    let bounding_box = Rect::from_corners(
        transform.layer_point(bbox.origin),
        transform.layer_point(bbox.far_corner()),
    );

    let mut landmarks = FaceLandmarks::default();
    if let Some(source) = &observation.landmarks {
        for group in LandmarkGroup::ALL {
            let Some(points) = source.group(group).filter(|p| !p.is_empty()) else {
                continue;
            };
            let image_points: Vec<Point> =
                points.iter().map(|p| denormalize(*p, &bbox)).collect();
            *landmarks.group_mut(group) = Some(transform.layer_points(&image_points));
        }
    }

    GeometryUpdate {
        bounding_box,
        landmarks,
    }
}
