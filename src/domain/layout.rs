/// Maps normalized marker positions into a viewport of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLayout {
    pub width: f32,
    pub height: f32,
}

impl MarkerLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Markers are a tenth of the view width in radius
    pub fn radius(&self) -> f32 {
        self.width / 10.0
    }

    /// Left edge of a horizontally centred marker
    pub fn x(&self) -> f32 {
        self.width / 2.0 - self.radius()
    }

    /// Top edge of a marker whose normalized position is `position`.
    pub fn y(&self, position: f64) -> f32 {
        (position * self.height as f64) as f32 - self.radius()
    }

    /// Top-left corner of the marker's bounding square.
    pub fn origin(&self, position: f64) -> (f32, f32) {
        (self.x(), self.y(position))
    }

    /// Centre of the marker circle.
    pub fn center(&self, position: f64) -> (f32, f32) {
        let (x, y) = self.origin(position);
        (x + self.radius(), y + self.radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tracker::{position_for_distance, DistancePolicy};

    #[test]
    fn test_radius_and_x() {
        let layout = MarkerLayout::new(1080.0, 2000.0);
        assert_eq!(layout.radius(), 108.0);
        assert_eq!(layout.x(), 432.0);
    }

    #[test]
    fn test_y_matches_linear_distance_mapping() {
        let layout = MarkerLayout::new(1000.0, 1300.0);
        let max_range = 13.0;
        for distance in [0.0, 1.0, 6.5, 13.0] {
            let position = position_for_distance(distance, max_range, DistancePolicy::Extrapolate);
            let expected = ((max_range - distance) * 1300.0 / max_range) as f32 - 100.0;
            assert!((layout.y(position) - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_center_offsets_by_radius() {
        let layout = MarkerLayout::new(200.0, 400.0);
        assert_eq!(layout.center(0.5), (100.0, 200.0));
    }
}
