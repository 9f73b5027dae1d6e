use crate::overlay::domain::face_geometry::{FaceGeometry, GeometryUpdate};

/// Instructions sent from the frame worker to the UI-owning context.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayMessage {
    /// No face in view: empty every field.
    Clear,
    /// One frame's complete projected geometry.
    Update(GeometryUpdate),
    SetHidden(bool),
    Redraw,
}

/// Worker-side end of the overlay. Must never block on the UI.
pub trait OverlaySink: Send {
    fn publish(&mut self, message: OverlayMessage);
}

/// Draws the overlay. Runs on the UI-owning context only.
pub trait OverlayRenderer {
    fn redraw(&mut self, geometry: &FaceGeometry);
}
