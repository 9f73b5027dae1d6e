pub mod face_geometry;
pub mod overlay_sink;
