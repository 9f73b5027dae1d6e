pub mod shared_preview_geometry;
