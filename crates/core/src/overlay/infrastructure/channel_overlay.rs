use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::overlay::domain::face_geometry::FaceGeometry;
use crate::overlay::domain::overlay_sink::{OverlayMessage, OverlayRenderer, OverlaySink};

/// Creates a connected publisher/overlay pair.
///
/// The publisher goes to the frame worker; the overlay stays on the UI
/// context, which is the only place geometry is ever written.
pub fn overlay_channel() -> (OverlayPublisher, FaceOverlay) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (OverlayPublisher { tx }, FaceOverlay::new(rx))
}

#[derive(Clone)]
pub struct OverlayPublisher {
    tx: Sender<OverlayMessage>,
}

impl OverlaySink for OverlayPublisher {
    fn publish(&mut self, message: OverlayMessage) {
        if self.tx.send(message).is_err() {
            log::debug!("Overlay closed, dropping message");
        }
    }
}

/// UI-side overlay state fed by an [`OverlayPublisher`].
pub struct FaceOverlay {
    rx: Receiver<OverlayMessage>,
    geometry: FaceGeometry,
    redraws: usize,
}

impl FaceOverlay {
    fn new(rx: Receiver<OverlayMessage>) -> Self {
        Self {
            rx,
            geometry: FaceGeometry::default(),
            redraws: 0,
        }
    }

    pub fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    /// Total redraws performed so far.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Applies every pending message in order without blocking.
    ///
    /// Returns the number of redraws performed.
    pub fn drain(&mut self, renderer: &mut dyn OverlayRenderer) -> usize {
        let mut performed = 0;
        loop {
            match self.rx.try_recv() {
                Ok(message) => {
                    if self.handle(message, renderer) {
                        performed += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        performed
    }

    /// Blocks applying messages until every publisher has been dropped.
    pub fn run_until_closed(&mut self, renderer: &mut dyn OverlayRenderer) -> usize {
        let mut performed = 0;
        while let Ok(message) = self.rx.recv() {
            if self.handle(message, renderer) {
                performed += 1;
            }
        }
        performed
    }

    fn handle(&mut self, message: OverlayMessage, renderer: &mut dyn OverlayRenderer) -> bool {
        match message {
            OverlayMessage::Clear => self.geometry = self.geometry.cleared(),
            OverlayMessage::Update(update) => self.geometry = self.geometry.apply(&update),
            OverlayMessage::SetHidden(hidden) => self.geometry.is_hidden = hidden,
            OverlayMessage::Redraw => {
                renderer.redraw(&self.geometry);
                self.redraws += 1;
                return true;
            }
        }
        false
    }
}
