use crate::shared::geometry::{Point, Rect};

/// Maps normalized capture-device coordinates to preview-layer pixels.
pub trait LayerTransform {
    fn layer_point(&self, device_point: Point) -> Point;

    fn layer_points(&self, device_points: &[Point]) -> Vec<Point> {
        device_points.iter().map(|p| self.layer_point(*p)).collect()
    }
}

/// Re-bases a box-relative normalized point onto the full image.
pub fn denormalize(point: Point, rect: &Rect) -> Point {
    Point::new(
        rect.origin.x + point.x * rect.size.width,
        rect.origin.y + point.y * rect.size.height,
    )
}
