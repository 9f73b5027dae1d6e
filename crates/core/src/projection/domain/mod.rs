pub mod coordinate_transform;
pub mod preview_geometry;
