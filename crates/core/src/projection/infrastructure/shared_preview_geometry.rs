use std::sync::{Arc, PoisonError, RwLock};

use crate::projection::domain::preview_geometry::PreviewGeometry;
use crate::shared::geometry::Rect;

/// Preview geometry shared between the UI context (writer) and the frame
/// worker (reader).
///
/// The UI updates it whenever the viewport or video format changes; the
/// worker takes a [`snapshot`](Self::snapshot) per frame so every field of
/// one publish is projected with the same geometry.
#[derive(Clone, Debug)]
pub struct SharedPreviewGeometry {
    inner: Arc<RwLock<PreviewGeometry>>,
}

impl SharedPreviewGeometry {
    pub fn new(geometry: PreviewGeometry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(geometry)),
        }
    }

    pub fn snapshot(&self) -> PreviewGeometry {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, geometry: PreviewGeometry) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = geometry;
    }

    /// Moves or resizes the preview layer, keeping gravity and orientation.
    pub fn resize(&self, layer_bounds: Rect) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!(
            "Preview resized to {}x{} at ({}, {})",
            layer_bounds.size.width,
            layer_bounds.size.height,
            layer_bounds.origin.x,
            layer_bounds.origin.y
        );
        guard.layer_bounds = layer_bounds;
    }
}
