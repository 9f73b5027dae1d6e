use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::face_observation::FaceObservation;
use crate::detection::domain::image_orientation::ImageOrientation;
use crate::detection::domain::landmark_detector::{DetectionError, LandmarkDetector};
use crate::shared::frame::PixelBuffer;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("failed to read recording {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed recording {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Recorded backend output, keyed by frame index.
///
/// `failures` lists frame indices on which the backend call itself failed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub frames: HashMap<usize, Vec<FaceObservation>>,
    #[serde(default)]
    pub failures: HashSet<usize>,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ReplayError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Replays recorded observations by frame index.
///
/// Stands in for a live landmark engine when running the pipeline against
/// captured footage; frames missing from the recording report no face.
pub struct ReplayLandmarkDetector {
    recording: Recording,
}

impl ReplayLandmarkDetector {
    pub fn new(recording: Recording) -> Self {
        Self { recording }
    }

    pub fn from_file(path: &Path) -> Result<Self, ReplayError> {
        let recording = Recording::load(path)?;
        log::info!(
            "Loaded recording with {} frames ({} failures) from {}",
            recording.frames.len(),
            recording.failures.len(),
            path.display()
        );
        Ok(Self::new(recording))
    }
}

impl LandmarkDetector for ReplayLandmarkDetector {
    fn detect(
        &mut self,
        buffer: &PixelBuffer,
        orientation: ImageOrientation,
    ) -> Result<Vec<FaceObservation>, DetectionError> {
        let index = buffer.frame_index();
        log::debug!("Replaying frame {index} (orientation {orientation})");
        if self.recording.failures.contains(&index) {
            return Err(format!("recorded detector failure on frame {index}").into());
        }
        Ok(self
            .recording
            .frames
            .get(&index)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geometry::Rect;
    use std::io::Write;

    fn buffer(index: usize) -> PixelBuffer {
        PixelBuffer::new(vec![0u8; 4 * 4 * 3], 4, 4, 3, index)
    }

    fn face(x: f64) -> FaceObservation {
        FaceObservation::new(Rect::new(x, 0.1, 0.2, 0.2))
    }

    fn detect(detector: &mut ReplayLandmarkDetector, index: usize) -> Vec<FaceObservation> {
        detector
            .detect(&buffer(index), ImageOrientation::LeftMirrored)
            .unwrap()
    }

    #[test]
    fn test_returns_recorded_faces_for_known_frame() {
        let recording = Recording {
            frames: HashMap::from([(0, vec![face(0.1), face(0.5)])]),
            failures: HashSet::new(),
        };
        let mut detector = ReplayLandmarkDetector::new(recording);

        let result = detect(&mut detector, 0);

        assert_eq!(result, vec![face(0.1), face(0.5)]);
    }

    #[test]
    fn test_returns_empty_for_unknown_frame() {
        let recording = Recording {
            frames: HashMap::from([(0, vec![face(0.1)])]),
            failures: HashSet::new(),
        };
        let mut detector = ReplayLandmarkDetector::new(recording);

        assert!(detect(&mut detector, 9).is_empty());
    }

    #[test]
    fn test_recorded_failure_returns_error() {
        let recording = Recording {
            frames: HashMap::from([(2, vec![face(0.1)])]),
            failures: HashSet::from([2]),
        };
        let mut detector = ReplayLandmarkDetector::new(recording);

        let err = detector
            .detect(&buffer(2), ImageOrientation::LeftMirrored)
            .unwrap_err();

        assert!(err.to_string().contains("frame 2"));
    }

    #[test]
    fn test_from_file_parses_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "frames": {{
                    "1": [{{"bounding_box": {{"origin": {{"x": 0.2, "y": 0.2}}, "size": {{"width": 0.3, "height": 0.3}}}}}}]
                }},
                "failures": [4]
            }}"#
        )
        .unwrap();

        let mut detector = ReplayLandmarkDetector::from_file(file.path()).unwrap();

        assert_eq!(detect(&mut detector, 1).len(), 1);
        assert!(detect(&mut detector, 0).is_empty());
        assert!(detector.detect(&buffer(4), ImageOrientation::Up).is_err());
    }

    #[test]
    fn test_from_file_missing_path() {
        let result = ReplayLandmarkDetector::from_file(Path::new("/nonexistent/recording.json"));
        assert!(matches!(result, Err(ReplayError::Read { .. })));
    }

    #[test]
    fn test_from_file_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = ReplayLandmarkDetector::from_file(file.path());

        assert!(matches!(result, Err(ReplayError::Parse { .. })));
    }
}
