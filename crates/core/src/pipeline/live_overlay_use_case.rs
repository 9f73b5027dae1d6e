use std::time::Duration;

use crate::overlay::domain::overlay_sink::OverlayRenderer;
use crate::overlay::infrastructure::channel_overlay::FaceOverlay;
use crate::pipeline::frame_dispatcher::{FrameDispatcher, PipelineStats};
use crate::pipeline::infrastructure::threaded_frame_pipeline::{
    PipelineError, ThreadedFramePipeline,
};
use crate::source::domain::frame_source::FrameSource;

/// Drives a frame source through the dispatcher while the calling thread
/// acts as the UI context.
///
/// Threads: `camera [source] → worker [detect → project] → caller [overlay → renderer]`
pub struct LiveOverlayUseCase {
    source: Box<dyn FrameSource>,
    dispatcher: FrameDispatcher,
    frame_interval: Option<Duration>,
}

impl LiveOverlayUseCase {
    pub fn new(source: Box<dyn FrameSource>, dispatcher: FrameDispatcher) -> Self {
        Self {
            source,
            dispatcher,
            frame_interval: None,
        }
    }

    /// Paces frame delivery like a camera running at a fixed rate.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    /// Runs until the source is exhausted and every queued frame has been
    /// drawn. The source must already be open.
    pub fn execute(
        self,
        overlay: &mut FaceOverlay,
        renderer: &mut dyn OverlayRenderer,
    ) -> Result<PipelineStats, Box<dyn std::error::Error>> {
        let LiveOverlayUseCase {
            mut source,
            dispatcher,
            frame_interval,
        } = self;

        let handle = ThreadedFramePipeline::spawn(dispatcher)?;

        let camera = std::thread::Builder::new()
            .name("frame-source".to_string())
            .spawn(move || -> Result<PipelineStats, PipelineError> {
                let mut submitted = Ok(());
                for frame in source.frames() {
                    submitted = handle.submit(frame);
                    if submitted.is_err() {
                        break;
                    }
                    if let Some(interval) = frame_interval {
                        std::thread::sleep(interval);
                    }
                }
                // A worker that died mid-run reports why through the join.
                let stats = handle.finish()?;
                submitted.map(|_| stats)
            })?;

        let redraws = overlay.run_until_closed(renderer);
        log::debug!("Overlay closed after {redraws} redraws");

        let stats = camera
            .join()
            .map_err(|_| "Frame source thread panicked")??;
        Ok(stats)
    }
}
