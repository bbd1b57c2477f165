//! Pure geometry helpers shared by the shape model.
//!
//! All coordinates are canvas pixel coordinates (`f64`), y growing downwards.
//! Nothing here can fail: degenerate input (zero-length segments, zero-area
//! ellipses) is handled by explicit branches.

pub mod hit_testing;

use serde::{Deserialize, Serialize};

pub use hit_testing::{
    is_point_in_ellipse, is_point_in_rectangle, is_point_on_elliptical_arc_border,
    is_point_on_smooth_curve, is_top_left_to_bottom_right,
};

/// A single sampled point of a freehand line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub pos_x: f64,
    pub pos_y: f64,
}

impl Trace {
    pub const fn new(pos_x: f64, pos_y: f64) -> Self {
        Self { pos_x, pos_y }
    }

    /// Midpoint between this trace and `other`
    pub fn midpoint(&self, other: &Trace) -> Trace {
        Trace::new((self.pos_x + other.pos_x) / 2.0, (self.pos_y + other.pos_y) / 2.0)
    }
}

/// Euclidean distance between two points
pub fn point_to_point_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Distance from a point to the segment `(start_x, start_y)-(end_x, end_y)`.
///
/// The projection parameter is clamped to `[0, 1]`; a zero-length segment is
/// treated as a single point.
pub fn point_to_segment_distance(
    x: f64,
    y: f64,
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
) -> f64 {
    let lx = end_x - start_x;
    let ly = end_y - start_y;
    let len_squared = lx * lx + ly * ly;

    let t = if len_squared == 0.0 {
        0.0
    } else {
        (((x - start_x) * lx + (y - start_y) * ly) / len_squared).clamp(0.0, 1.0)
    };

    let projection_x = start_x + t * lx;
    let projection_y = start_y + t * ly;
    (x - projection_x).hypot(y - projection_y)
}

/// Inclusive range check that does not care which bound is the smaller one
pub fn is_number_between(value: f64, bound_a: f64, bound_b: f64) -> bool {
    let (min, max) = if bound_a > bound_b {
        (bound_b, bound_a)
    } else {
        (bound_a, bound_b)
    };
    value >= min && value <= max
}

/// Maps device pointer coordinates onto the canvas' pixel space.
///
/// `left`/`top` is the on-screen origin of the displayed canvas and `scale`
/// is the canvas pixel size divided by its displayed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub left: f64,
    pub top: f64,
    pub scale: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            scale: 1.0,
        }
    }
}

impl CanvasTransform {
    pub fn new(left: f64, top: f64, scale: f64) -> Self {
        Self { left, top, scale }
    }

    pub fn to_canvas(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        transform_canvas_coord(self.left, self.top, client_x, client_y, self.scale)
    }
}

/// Converts a device position into canvas coordinates
pub fn transform_canvas_coord(
    canvas_left: f64,
    canvas_top: f64,
    client_x: f64,
    client_y: f64,
    scale: f64,
) -> (f64, f64) {
    let dx = client_x - canvas_left;
    let dy = client_y - canvas_top;
    (dx * scale, dy * scale)
}

/// Display size for an image shown inside a container: natural size when it
/// fits, otherwise shrunk to fit while keeping its aspect ratio.
///
/// Returns `(width, height, scale)` where `scale` is image width over
/// displayed width.
pub fn fit_canvas_size(
    image_width: f64,
    image_height: f64,
    container_width: f64,
    container_height: f64,
) -> (f64, f64, f64) {
    if image_width <= 0.0 || image_height <= 0.0 {
        return (container_width, container_height, 1.0);
    }
    let shrink = (container_width / image_width)
        .min(container_height / image_height)
        .min(1.0);
    let (width, height) = if shrink >= 1.0 {
        (image_width, image_height)
    } else {
        (image_width * shrink, image_height * shrink)
    };
    (width, height, image_width / width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        assert_eq!(point_to_point_distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(point_to_point_distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_segment_distance_projects_inside_segment() {
        let d = point_to_segment_distance(5.0, 5.0, 0.0, 0.0, 10.0, 0.0);
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let before = point_to_segment_distance(-3.0, 4.0, 0.0, 0.0, 10.0, 0.0);
        assert_eq!(before, 5.0);

        let after = point_to_segment_distance(13.0, 4.0, 0.0, 0.0, 10.0, 0.0);
        assert_eq!(after, 5.0);
    }

    #[test]
    fn test_zero_length_segment_is_a_point() {
        let d = point_to_segment_distance(3.0, 4.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_number_between_ignores_bound_order() {
        assert!(is_number_between(5.0, 10.0, 0.0));
        assert!(is_number_between(0.0, 0.0, 10.0));
        assert!(!is_number_between(10.5, 0.0, 10.0));
    }

    #[test]
    fn test_transform_canvas_coord() {
        let transform = CanvasTransform::new(100.0, 50.0, 2.0);
        assert_eq!(transform.to_canvas(110.0, 60.0), (20.0, 20.0));
        assert_eq!(transform_canvas_coord(0.0, 0.0, 7.0, 3.0, 1.0), (7.0, 3.0));
    }

    #[test]
    fn test_fit_canvas_size() {
        assert_eq!(fit_canvas_size(400.0, 300.0, 800.0, 600.0), (400.0, 300.0, 1.0));
        assert_eq!(fit_canvas_size(1600.0, 600.0, 800.0, 600.0), (800.0, 300.0, 2.0));
        assert_eq!(fit_canvas_size(600.0, 1200.0, 800.0, 600.0), (300.0, 600.0, 2.0));
    }
}
