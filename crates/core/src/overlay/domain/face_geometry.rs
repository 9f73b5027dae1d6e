use serde::{Deserialize, Serialize};

use crate::detection::domain::face_observation::{FaceLandmarks, LandmarkGroup};
use crate::shared::geometry::{Point, Rect};

/// Layer-space geometry produced from one detection.
///
/// Landmark groups left as `None` (or empty) are not part of this publish.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryUpdate {
    pub bounding_box: Rect,
    pub landmarks: FaceLandmarks,
}

/// The overlay's drawable state, in preview-layer pixels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    pub bounding_box: Rect,
    pub left_eye: Vec<Point>,
    pub right_eye: Vec<Point>,
    pub left_eyebrow: Vec<Point>,
    pub right_eyebrow: Vec<Point>,
    pub nose: Vec<Point>,
    pub outer_lips: Vec<Point>,
    pub inner_lips: Vec<Point>,
    pub face_contour: Vec<Point>,
    pub is_hidden: bool,
}

impl FaceGeometry {
    pub fn points(&self, group: LandmarkGroup) -> &[Point] {
        match group {
            LandmarkGroup::LeftEye => &self.left_eye,
            LandmarkGroup::RightEye => &self.right_eye,
            LandmarkGroup::LeftEyebrow => &self.left_eyebrow,
            LandmarkGroup::RightEyebrow => &self.right_eyebrow,
            LandmarkGroup::Nose => &self.nose,
            LandmarkGroup::OuterLips => &self.outer_lips,
            LandmarkGroup::InnerLips => &self.inner_lips,
            LandmarkGroup::FaceContour => &self.face_contour,
        }
    }

    fn points_mut(&mut self, group: LandmarkGroup) -> &mut Vec<Point> {
        match group {
            LandmarkGroup::LeftEye => &mut self.left_eye,
            LandmarkGroup::RightEye => &mut self.right_eye,
            LandmarkGroup::LeftEyebrow => &mut self.left_eyebrow,
            LandmarkGroup::RightEyebrow => &mut self.right_eyebrow,
            LandmarkGroup::Nose => &mut self.nose,
            LandmarkGroup::OuterLips => &mut self.outer_lips,
            LandmarkGroup::InnerLips => &mut self.inner_lips,
            LandmarkGroup::FaceContour => &mut self.face_contour,
        }
    }

    /// Merges one publish into the current state.
    ///
    /// The box is always replaced. Landmark groups missing or empty in the
    /// update keep their previous points.
    pub fn apply(&self, update: &GeometryUpdate) -> FaceGeometry {
        let mut next = self.clone();
        next.bounding_box = update.bounding_box;
        for group in LandmarkGroup::ALL {
            match update.landmarks.group(group) {
                Some(points) if !points.is_empty() => *next.points_mut(group) = points.to_vec(),
                _ => {}
            }
        }
        next
    }

    /// Empties the box and every landmark group. Visibility is preserved.
    pub fn cleared(&self) -> FaceGeometry {
        FaceGeometry {
            is_hidden: self.is_hidden,
            ..FaceGeometry::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bounding_box.is_empty()
            && LandmarkGroup::ALL
                .iter()
                .all(|group| self.points(*group).is_empty())
    }
}
