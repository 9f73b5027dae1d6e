//! Detector output: one face box plus up to eight named landmark groups.
//!
//! Box coordinates are normalized to the full image. Landmark points are
//! normalized to the face box, not the image.

use serde::{Deserialize, Serialize};

use crate::shared::geometry::{Point, Rect};

/// The fixed set of landmark groups a backend may report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkGroup {
    LeftEye,
    RightEye,
    LeftEyebrow,
    RightEyebrow,
    Nose,
    OuterLips,
    InnerLips,
    FaceContour,
}

impl LandmarkGroup {
    pub const ALL: [LandmarkGroup; 8] = [
        LandmarkGroup::LeftEye,
        LandmarkGroup::RightEye,
        LandmarkGroup::LeftEyebrow,
        LandmarkGroup::RightEyebrow,
        LandmarkGroup::Nose,
        LandmarkGroup::OuterLips,
        LandmarkGroup::InnerLips,
        LandmarkGroup::FaceContour,
    ];
}

/// Per-group point sequences. A `None` group was not reported by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceLandmarks {
    pub left_eye: Option<Vec<Point>>,
    pub right_eye: Option<Vec<Point>>,
    pub left_eyebrow: Option<Vec<Point>>,
    pub right_eyebrow: Option<Vec<Point>>,
    pub nose: Option<Vec<Point>>,
    pub outer_lips: Option<Vec<Point>>,
    pub inner_lips: Option<Vec<Point>>,
    pub face_contour: Option<Vec<Point>>,
}

impl FaceLandmarks {
    pub fn group(&self, group: LandmarkGroup) -> Option<&[Point]> {
        let points = match group {
            LandmarkGroup::LeftEye => &self.left_eye,
            LandmarkGroup::RightEye => &self.right_eye,
            LandmarkGroup::LeftEyebrow => &self.left_eyebrow,
            LandmarkGroup::RightEyebrow => &self.right_eyebrow,
            LandmarkGroup::Nose => &self.nose,
            LandmarkGroup::OuterLips => &self.outer_lips,
            LandmarkGroup::InnerLips => &self.inner_lips,
            LandmarkGroup::FaceContour => &self.face_contour,
        };
        points.as_deref()
    }

    pub fn group_mut(&mut self, group: LandmarkGroup) -> &mut Option<Vec<Point>> {
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

    pub fn with_group(mut self, group: LandmarkGroup, points: Vec<Point>) -> Self {
        *self.group_mut(group) = Some(points);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: Rect,
    #[serde(default)]
    pub landmarks: Option<FaceLandmarks>,
}

impl FaceObservation {
    pub fn new(bounding_box: Rect) -> Self {
        Self {
            bounding_box,
            landmarks: None,
        }
    }

    pub fn with_landmarks(mut self, landmarks: FaceLandmarks) -> Self {
        self.landmarks = Some(landmarks);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_accessors_cover_every_group() {
        let mut landmarks = FaceLandmarks::default();
        for (i, group) in LandmarkGroup::ALL.iter().enumerate() {
            *landmarks.group_mut(*group) = Some(vec![Point::new(i as f64, 0.0)]);
        }
        for (i, group) in LandmarkGroup::ALL.iter().enumerate() {
            assert_eq!(landmarks.group(*group), Some(&[Point::new(i as f64, 0.0)][..]));
        }
    }

    #[test]
    fn test_missing_group_is_none() {
        let landmarks = FaceLandmarks::default().with_group(LandmarkGroup::Nose, vec![]);
        assert!(landmarks.group(LandmarkGroup::LeftEye).is_none());
        assert_eq!(landmarks.group(LandmarkGroup::Nose), Some(&[][..]));
    }

    #[test]
    fn test_deserialize_partial_recording() {
        let json = r#"{
            "bounding_box": {"origin": {"x": 0.1, "y": 0.2}, "size": {"width": 0.3, "height": 0.4}},
            "landmarks": {"nose": [{"x": 0.5, "y": 0.5}]}
        }"#;
        let obs: FaceObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.bounding_box, Rect::new(0.1, 0.2, 0.3, 0.4));
        let landmarks = obs.landmarks.unwrap();
        assert_eq!(landmarks.nose, Some(vec![Point::new(0.5, 0.5)]));
        assert!(landmarks.outer_lips.is_none());
    }

    #[test]
    fn test_deserialize_without_landmarks() {
        let json = r#"{"bounding_box": {"origin": {"x": 0, "y": 0}, "size": {"width": 1, "height": 1}}}"#;
        let obs: FaceObservation = serde_json::from_str(json).unwrap();
        assert!(obs.landmarks.is_none());
    }
}
