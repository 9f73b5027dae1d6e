//! Face landmark overlay core.
//!
//! Camera frames go through a single worker that calls a landmark backend,
//! projects the first face into preview-layer coordinates and publishes the
//! result to an overlay owned by the UI context.

pub mod detection;
pub mod overlay;
pub mod pipeline;
pub mod projection;
pub mod shared;
pub mod source;
