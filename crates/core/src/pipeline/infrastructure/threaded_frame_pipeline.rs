use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use thiserror::Error;

use crate::pipeline::frame_dispatcher::{FrameDispatcher, PipelineStats};
use crate::shared::constants::WORKER_THREAD_NAME;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to spawn frame worker: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("frame worker has stopped")]
    WorkerGone,
    #[error("frame worker panicked")]
    WorkerPanicked,
}

/// Runs a [`FrameDispatcher`] on one dedicated worker thread.
///
/// Layout: `camera callbacks → unbounded queue → worker [detect → project] → overlay`
///
/// Frames are processed strictly in arrival order. A slow detection call
/// simply lets the queue grow; nothing is dropped here.
pub struct ThreadedFramePipeline;

impl ThreadedFramePipeline {
    pub fn spawn(mut dispatcher: FrameDispatcher) -> Result<FramePipelineHandle, PipelineError> {
        let (tx, rx) = crossbeam_channel::unbounded::<Frame>();

        let worker = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let mut stats = PipelineStats::default();
                for frame in rx {
                    stats.record(dispatcher.submit(frame));
                }
                dispatcher.finish(&stats);
                stats
            })
            .map_err(PipelineError::Spawn)?;

        Ok(FramePipelineHandle {
            submitter: FrameSubmitter { tx },
            worker,
        })
    }
}

/// Cloneable entry point for camera callbacks.
#[derive(Clone)]
pub struct FrameSubmitter {
    tx: Sender<Frame>,
}

impl FrameSubmitter {
    pub fn submit(&self, frame: Frame) -> Result<(), PipelineError> {
        self.tx.send(frame).map_err(|_| PipelineError::WorkerGone)
    }
}

pub struct FramePipelineHandle {
    submitter: FrameSubmitter,
    worker: JoinHandle<PipelineStats>,
}

impl FramePipelineHandle {
    pub fn submit(&self, frame: Frame) -> Result<(), PipelineError> {
        self.submitter.submit(frame)
    }

    pub fn submitter(&self) -> FrameSubmitter {
        self.submitter.clone()
    }

    /// Closes this handle's end of the queue and waits for the worker.
    ///
    /// The worker exits once every [`FrameSubmitter`] clone is dropped and
    /// the queue is drained.
    pub fn finish(self) -> Result<PipelineStats, PipelineError> {
        let FramePipelineHandle { submitter, worker } = self;
        drop(submitter);
        worker.join().map_err(|_| PipelineError::WorkerPanicked)
    }
}
