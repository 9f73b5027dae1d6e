use std::time::Instant;

use crate::detection::domain::image_orientation::ImageOrientation;
use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::pipeline::landmark_projector::LandmarkProjector;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::FRONT_CAMERA_ORIENTATION;
use crate::shared::frame::Frame;

/// What happened to one submitted frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No readable pixel buffer; nothing was done.
    Dropped,
    /// The detector call failed; the overlay was left untouched.
    Failed,
    /// Detection succeeded and the overlay was updated (or cleared).
    Projected { faces: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub submitted: usize,
    pub dropped: usize,
    pub failed: usize,
    pub projected: usize,
}

impl PipelineStats {
    pub fn record(&mut self, outcome: FrameOutcome) {
        self.submitted += 1;
        match outcome {
            FrameOutcome::Dropped => self.dropped += 1,
            FrameOutcome::Failed => self.failed += 1,
            FrameOutcome::Projected { .. } => self.projected += 1,
        }
    }
}

/// Runs one detection per frame and forwards results to the projector.
///
/// Owned by a single worker; `&mut self` keeps at most one detection in
/// flight.
pub struct FrameDispatcher {
    detector: Box<dyn LandmarkDetector>,
    projector: LandmarkProjector,
    orientation: ImageOrientation,
    logger: Box<dyn PipelineLogger>,
}

impl FrameDispatcher {
    pub fn new(
        detector: Box<dyn LandmarkDetector>,
        projector: LandmarkProjector,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            detector,
            projector,
            orientation: FRONT_CAMERA_ORIENTATION,
            logger,
        }
    }

    pub fn with_orientation(mut self, orientation: ImageOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn submit(&mut self, frame: Frame) -> FrameOutcome {
        let Some(buffer) = frame.pixel_buffer() else {
            return FrameOutcome::Dropped;
        };

        let detect_start = Instant::now();
        let results = match self.detector.detect(buffer, self.orientation) {
            Ok(results) => results,
            Err(e) => {
                log::warn!("Face detection failed on frame {}: {e}", frame.index());
                return FrameOutcome::Failed;
            }
        };
        self.logger
            .timing("detect", detect_start.elapsed().as_secs_f64() * 1000.0);

        let project_start = Instant::now();
        self.projector.on_detection_complete(&results);
        self.logger
            .timing("project", project_start.elapsed().as_secs_f64() * 1000.0);

        self.logger.metric("faces", results.len() as f64);
        self.logger.frame_processed(frame.index());

        FrameOutcome::Projected {
            faces: results.len(),
        }
    }

    /// Reports the run totals and the logger's end-of-run summary.
    pub fn finish(&mut self, stats: &PipelineStats) {
        self.logger.info(&format!(
            "Frame queue closed after {} frames ({} dropped, {} failed)",
            stats.submitted, stats.dropped, stats.failed
        ));
        self.logger.summary();
    }
}
