//! Point-in-shape tests used by the shapes' hit detection.

use std::f64::consts::PI;

use super::{is_number_between, point_to_point_distance, Trace};

/// Slack added around each curve segment's bounding box before sampling it
const CURVE_BOUNDS_SLACK: f64 = 5.0;
/// Number of parameter steps used when sampling a curve segment
const CURVE_SAMPLES: u32 = 20;

/// Inclusive containment in the box spanned by two opposite corners,
/// in whichever order the corners are given.
pub fn is_point_in_rectangle(x: f64, y: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> bool {
    is_number_between(x, x1, x2) && is_number_between(y, y1, y2)
}

/// Strict interior test via the normalized ellipse equation.
///
/// A degenerate ellipse (any radius `<= 0`) contains nothing.
pub fn is_point_in_ellipse(x: f64, y: f64, cx: f64, cy: f64, rx: f64, ry: f64) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }

    let dx = x - cx;
    let dy = y - cy;
    (dx / rx).powi(2) + (dy / ry).powi(2) < 1.0
}

/// Whether `(x, y)` lies on the stroked border of the elliptical arc between
/// `start_angle` and `end_angle` (radians in `[0, 2π]`, canvas orientation).
///
/// The border is accepted within `line_width / 2` of the ellipse's radius at
/// the point's polar angle.
#[allow(clippy::too_many_arguments)]
pub fn is_point_on_elliptical_arc_border(
    x: f64,
    y: f64,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    start_angle: f64,
    end_angle: f64,
    line_width: f64,
) -> bool {
    let rel_x = x - cx;
    let rel_y = y - cy;
    let distance = point_to_point_distance(x, y, cx, cy);

    let mut angle = rel_y.atan2(rel_x);
    if angle < 0.0 {
        angle += 2.0 * PI;
    }

    if angle < start_angle || angle > end_angle {
        return false;
    }

    let (sin, cos) = angle.sin_cos();
    let denominator = ((ry * cos).powi(2) + (rx * sin).powi(2)).sqrt();
    let ellipse_radius = if denominator == 0.0 {
        0.0
    } else {
        rx * ry / denominator
    };

    (distance - ellipse_radius).abs() <= line_width / 2.0
}

/// True when the diagonal from begin to end runs NW↔SE (in canvas space).
/// Only used to choose which diagonal resize cursor to report.
pub fn is_top_left_to_bottom_right(begin_x: f64, begin_y: f64, end_x: f64, end_y: f64) -> bool {
    (end_x - begin_x) * (end_y - begin_y) >= 0.0
}

/// Whether `(x, y)` is within `threshold` of the smoothed polyline through
/// `traces`.
///
/// Each consecutive pair of traces forms a quadratic segment whose control
/// point is the pair's midpoint. Segments whose padded bounding box misses the
/// point are skipped; the rest are sampled at `t = 0, 0.05, …, 1`.
pub fn is_point_on_smooth_curve(x: f64, y: f64, traces: &[Trace], threshold: f64) -> bool {
    match traces {
        [] => false,
        [only] => point_to_point_distance(x, y, only.pos_x, only.pos_y) <= threshold,
        _ => traces.windows(2).any(|pair| {
            let start = pair[0];
            let end = pair[1];
            let control = start.midpoint(&end);

            is_point_in_curve_bounds(x, y, &start, &control, &end)
                && is_point_on_quadratic(x, y, [start, control, end], threshold)
        }),
    }
}

fn is_point_in_curve_bounds(x: f64, y: f64, p0: &Trace, p1: &Trace, p2: &Trace) -> bool {
    let min_x = p0.pos_x.min(p1.pos_x).min(p2.pos_x);
    let max_x = p0.pos_x.max(p1.pos_x).max(p2.pos_x);
    let min_y = p0.pos_y.min(p1.pos_y).min(p2.pos_y);
    let max_y = p0.pos_y.max(p1.pos_y).max(p2.pos_y);

    x >= min_x - CURVE_BOUNDS_SLACK
        && x <= max_x + CURVE_BOUNDS_SLACK
        && y >= min_y - CURVE_BOUNDS_SLACK
        && y <= max_y + CURVE_BOUNDS_SLACK
}

fn is_point_on_quadratic(x: f64, y: f64, [p0, p1, p2]: [Trace; 3], threshold: f64) -> bool {
    let threshold_squared = threshold * threshold;
    let mut min_distance_squared = f64::INFINITY;

    for step in 0..=CURVE_SAMPLES {
        let t = f64::from(step) / f64::from(CURVE_SAMPLES);
        let u = 1.0 - t;
        let bx = u * u * p0.pos_x + 2.0 * u * t * p1.pos_x + t * t * p2.pos_x;
        let by = u * u * p0.pos_y + 2.0 * u * t * p1.pos_y + t * t * p2.pos_y;

        let dx = bx - x;
        let dy = by - y;
        let distance_squared = dx * dx + dy * dy;

        if distance_squared < threshold_squared {
            return true;
        }
        min_distance_squared = min_distance_squared.min(distance_squared);
    }

    min_distance_squared.sqrt() <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_rectangle_is_inclusive() {
        assert!(is_point_in_rectangle(0.0, 0.0, 0.0, 0.0, 10.0, 10.0));
        assert!(is_point_in_rectangle(10.0, 10.0, 10.0, 10.0, 0.0, 0.0));
        assert!(is_point_in_rectangle(5.0, 5.0, 10.0, 0.0, 0.0, 10.0));
        assert!(!is_point_in_rectangle(10.1, 5.0, 0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_point_in_ellipse_is_strict() {
        assert!(is_point_in_ellipse(50.0, 50.0, 50.0, 50.0, 20.0, 10.0));
        assert!(is_point_in_ellipse(69.0, 50.0, 50.0, 50.0, 20.0, 10.0));
        // Exactly on the boundary is not inside
        assert!(!is_point_in_ellipse(70.0, 50.0, 50.0, 50.0, 20.0, 10.0));
        assert!(!is_point_in_ellipse(50.0, 61.0, 50.0, 50.0, 20.0, 10.0));
    }

    #[test]
    fn test_degenerate_ellipse_contains_nothing() {
        assert!(!is_point_in_ellipse(0.0, 0.0, 0.0, 0.0, 0.0, 10.0));
        assert!(!is_point_in_ellipse(0.0, 0.0, 0.0, 0.0, 10.0, 0.0));
    }

    #[test]
    fn test_arc_border_accepts_points_on_theoretical_radius() {
        let (cx, cy, rx, ry) = (100.0, 80.0, 60.0, 30.0);
        for step in 0..16 {
            let theta = f64::from(step) * (2.0 * PI / 16.0);
            let x = cx + rx * theta.cos();
            let y = cy + ry * theta.sin();
            assert!(
                is_point_on_elliptical_arc_border(x, y, cx, cy, rx, ry, 0.0, 2.0 * PI, 4.0),
                "theta {theta} should be on the border"
            );
        }
    }

    #[test]
    fn test_arc_border_respects_angle_range() {
        // (160, 80) sits at angle 0, outside the upper-left quadrant
        assert!(!is_point_on_elliptical_arc_border(
            160.0,
            80.0,
            100.0,
            80.0,
            60.0,
            30.0,
            PI,
            1.5 * PI,
            4.0
        ));
        // (40, 80) sits at angle π, inside it
        assert!(is_point_on_elliptical_arc_border(
            40.0,
            80.0,
            100.0,
            80.0,
            60.0,
            30.0,
            PI,
            1.5 * PI,
            4.0
        ));
    }

    #[test]
    fn test_arc_border_rejects_points_off_the_stroke() {
        assert!(!is_point_on_elliptical_arc_border(
            100.0,
            80.0,
            100.0,
            80.0,
            60.0,
            30.0,
            0.0,
            2.0 * PI,
            4.0
        ));
        assert!(!is_point_on_elliptical_arc_border(
            170.0,
            80.0,
            100.0,
            80.0,
            60.0,
            30.0,
            0.0,
            2.0 * PI,
            4.0
        ));
    }

    #[test]
    fn test_diagonal_direction() {
        assert!(is_top_left_to_bottom_right(0.0, 0.0, 10.0, 10.0));
        assert!(is_top_left_to_bottom_right(10.0, 10.0, 0.0, 0.0));
        assert!(!is_top_left_to_bottom_right(0.0, 10.0, 10.0, 0.0));
        assert!(!is_top_left_to_bottom_right(10.0, 0.0, 0.0, 10.0));
        // Flat boxes count as NW-SE
        assert!(is_top_left_to_bottom_right(0.0, 5.0, 10.0, 5.0));
    }

    #[test]
    fn test_smooth_curve_single_point() {
        let traces = [Trace::new(10.0, 10.0)];
        assert!(is_point_on_smooth_curve(13.0, 14.0, &traces, 5.0));
        assert!(!is_point_on_smooth_curve(20.0, 20.0, &traces, 5.0));
    }

    #[test]
    fn test_smooth_curve_follows_segments() {
        let traces = [
            Trace::new(0.0, 0.0),
            Trace::new(100.0, 0.0),
            Trace::new(100.0, 100.0),
        ];
        assert!(is_point_on_smooth_curve(50.0, 3.0, &traces, 5.0));
        assert!(is_point_on_smooth_curve(98.0, 60.0, &traces, 5.0));
        assert!(is_point_on_smooth_curve(100.0, 100.0, &traces, 1.0));
        assert!(!is_point_on_smooth_curve(50.0, 50.0, &traces, 5.0));
    }

    #[test]
    fn test_smooth_curve_empty_never_hits() {
        assert!(!is_point_on_smooth_curve(0.0, 0.0, &[], 100.0));
    }
}
