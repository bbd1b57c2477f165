use canvas_board::element::{
    Arrow, CursorStyle, Element, ElementType, ElementUpdate, Ellipse, Line, PositionType,
    Rectangle, Text, DOTTED_LINE_OFFSET,
};
use canvas_board::geometry::{is_point_in_ellipse, is_point_on_elliptical_arc_border, Trace};
use canvas_board::surface::DrawCall;
use canvas_board::RecordingSurface;

fn rect(begin: (f64, f64), end: (f64, f64), line_width: f64) -> Rectangle {
    let mut rect = Rectangle::new("#ffffff", line_width, begin.0, begin.1);
    rect.end_x = end.0;
    rect.end_y = end.1;
    rect
}

fn ellipse(begin: (f64, f64), end: (f64, f64), line_width: f64) -> Ellipse {
    let mut ellipse = Ellipse::new("#ffffff", line_width, begin.0, begin.1);
    ellipse.end_x = end.0;
    ellipse.end_y = end.1;
    ellipse
}

fn sample_shapes() -> Vec<ElementType> {
    let mut line = Line::new("#ffffff", 20.0, 0.0, 0.0);
    line.update(&ElementUpdate::end(10.0, 25.0));
    line.update(&ElementUpdate::end(40.0, 5.0));

    vec![
        ElementType::Rect(rect((10.0, 10.0), (110.0, 60.0), 10.0)),
        ElementType::Ellipse(ellipse((120.0, 40.0), (20.0, 140.0), 20.0)),
        ElementType::Arrow(Arrow::new("#ffffff", 20.0, 5.5, 7.25)),
        ElementType::Line(line),
        ElementType::Text(Text::new("#ffffff", 20.0, 30.0, 30.0, "label")),
    ]
}

#[test]
fn test_move_is_reversible() {
    for original in sample_shapes() {
        let mut shape = original.clone();
        shape.translate(37.5, -12.25);
        assert_ne!(shape.to_data(), original.to_data());
        shape.translate(-37.5, 12.25);
        assert_eq!(shape.to_data(), original.to_data());
    }
}

#[test]
fn test_rectangle_zones() {
    let shape = rect((10.0, 10.0), (110.0, 60.0), 10.0);
    let hit = |x, y| shape.is_inside(x, y).map(|hit| (hit.cursor_style, hit.position_type));

    assert_eq!(hit(60.0, 11.0), Some((CursorStyle::NsResize, PositionType::Top)));
    assert_eq!(hit(60.0, 35.0), Some((CursorStyle::Move, PositionType::Content)));
    assert_eq!(hit(200.0, 200.0), None);

    assert_eq!(hit(10.0, 10.0), Some((CursorStyle::NwseResize, PositionType::LeftTop)));
    assert_eq!(hit(110.0, 60.0), Some((CursorStyle::NwseResize, PositionType::RightBottom)));
    assert_eq!(hit(110.0, 10.0), Some((CursorStyle::NeswResize, PositionType::RightTop)));
    assert_eq!(hit(10.0, 60.0), Some((CursorStyle::NeswResize, PositionType::LeftBottom)));
    assert_eq!(hit(60.0, 59.0), Some((CursorStyle::NsResize, PositionType::Bottom)));
    assert_eq!(hit(8.0, 35.0), Some((CursorStyle::EwResize, PositionType::Left)));
    assert_eq!(hit(113.0, 35.0), Some((CursorStyle::EwResize, PositionType::Right)));
}

#[test]
fn test_rectangle_content_and_outside_regions() {
    let shape = rect((10.0, 10.0), (110.0, 60.0), 10.0);

    // Strictly inside the content region (interior minus half the line width)
    for (x, y) in [(15.5, 15.5), (104.5, 54.5), (60.0, 20.0), (30.0, 50.0)] {
        assert_eq!(
            shape.is_inside(x, y).map(|hit| hit.position_type),
            Some(PositionType::Content),
            "({x}, {y})"
        );
    }

    // Strictly outside the outer border (interior plus half the line width)
    for (x, y) in [(4.5, 30.0), (115.5, 30.0), (60.0, 4.5), (60.0, 65.5), (0.0, 0.0)] {
        assert!(shape.is_inside(x, y).is_none(), "({x}, {y})");
    }
}

#[test]
fn test_rectangle_drawn_backwards_keeps_anchor_relative_zones() {
    // Begin anchor at the bottom-right corner
    let shape = rect((110.0, 60.0), (10.0, 10.0), 10.0);

    let at_begin = shape.is_inside(110.0, 60.0).unwrap();
    assert_eq!(at_begin.position_type, PositionType::LeftTop);
    assert_eq!(at_begin.cursor_style, CursorStyle::NwseResize);

    let mut resized = shape.clone();
    resized.resize(PositionType::LeftTop, 10.0, 5.0);
    assert_eq!((resized.begin_x, resized.begin_y), (120.0, 65.0));
    assert_eq!((resized.end_x, resized.end_y), (10.0, 10.0));
}

#[test]
fn test_rectangle_resize_positions() {
    let cases = [
        (PositionType::LeftTop, (15.0, 5.0, 110.0, 60.0)),
        (PositionType::RightTop, (10.0, 5.0, 115.0, 60.0)),
        (PositionType::LeftBottom, (15.0, 10.0, 110.0, 55.0)),
        (PositionType::RightBottom, (10.0, 10.0, 115.0, 55.0)),
        (PositionType::Top, (10.0, 5.0, 110.0, 60.0)),
        (PositionType::Bottom, (10.0, 10.0, 110.0, 55.0)),
        (PositionType::Left, (15.0, 10.0, 110.0, 60.0)),
        (PositionType::Right, (10.0, 10.0, 115.0, 60.0)),
    ];

    for (position, expected) in cases {
        let mut shape = rect((10.0, 10.0), (110.0, 60.0), 10.0);
        shape.resize(position, 5.0, -5.0);
        assert_eq!(
            (shape.begin_x, shape.begin_y, shape.end_x, shape.end_y),
            expected,
            "{}",
            position.as_str()
        );
    }
}

#[test]
fn test_ellipse_hits() {
    let shape = ellipse((0.0, 0.0), (100.0, 60.0), 10.0);
    assert_eq!((shape.center_x(), shape.center_y()), (50.0, 30.0));
    assert_eq!((shape.radius_x(), shape.radius_y()), (50.0, 30.0));

    let right = shape.is_inside(100.0, 30.0).unwrap();
    assert_eq!(right.position_type, PositionType::RightBottom);
    assert_eq!(right.cursor_style, CursorStyle::NwseResize);

    let left = shape.is_inside(0.0, 30.0).unwrap();
    assert_eq!(left.position_type, PositionType::LeftTop);

    assert_eq!(
        shape.is_inside(50.0, 30.0).map(|hit| hit.position_type),
        Some(PositionType::Content)
    );
    assert!(shape.is_inside(200.0, 200.0).is_none());
}

#[test]
fn test_ellipse_border_agrees_with_interior_boundary() {
    let (cx, cy, rx, ry) = (50.0, 30.0, 50.0, 30.0);
    for theta in [0.1, 0.7, 1.2, 1.5] {
        let (x, y) = (cx + rx * f64::cos(theta), cy + ry * f64::sin(theta));
        assert!(
            is_point_on_elliptical_arc_border(
                x,
                y,
                cx,
                cy,
                rx,
                ry,
                0.0,
                std::f64::consts::FRAC_PI_2,
                10.0
            ),
            "theta {theta}"
        );
        // Points just inside the outline are interior
        assert!(is_point_in_ellipse(cx + 0.9 * (x - cx), cy + 0.9 * (y - cy), cx, cy, rx, ry));
    }
}

#[test]
fn test_ellipse_resizes_from_corners_only() {
    let mut shape = ellipse((0.0, 0.0), (100.0, 60.0), 10.0);
    shape.resize(PositionType::Top, 0.0, 10.0);
    shape.resize(PositionType::Right, 10.0, 0.0);
    assert_eq!((shape.begin_x, shape.begin_y, shape.end_x, shape.end_y), (0.0, 0.0, 100.0, 60.0));

    shape.resize(PositionType::RightBottom, 10.0, 20.0);
    assert_eq!((shape.end_x, shape.end_y), (110.0, 80.0));
}

#[test]
fn test_arrow_hits_and_handles() {
    let mut shape = Arrow::new("#ffffff", 20.0, 0.0, 0.0);
    assert_eq!((shape.end_x, shape.end_y), (100.0, 100.0));

    let tail = shape.is_inside(0.0, 5.0).unwrap();
    assert_eq!((tail.cursor_style, tail.position_type), (CursorStyle::NsResize, PositionType::Top));
    let head = shape.is_inside(100.0, 100.0).unwrap();
    assert_eq!(head.position_type, PositionType::Bottom);
    assert_eq!(
        shape.is_inside(50.0, 52.0).map(|hit| hit.position_type),
        Some(PositionType::Content)
    );
    assert!(shape.is_inside(50.0, 0.0).is_none());

    shape.resize(PositionType::Bottom, 10.0, 0.0);
    assert_eq!((shape.end_x, shape.end_y), (110.0, 100.0));
    shape.resize(PositionType::Top, -5.0, -5.0);
    assert_eq!((shape.begin_x, shape.begin_y), (-5.0, -5.0));
}

#[test]
fn test_arrow_head_strokes() {
    let mut shape = Arrow::new("#ffffff", 20.0, 0.0, 0.0);
    shape.end_x = 200.0;
    shape.end_y = 0.0;

    let [a, b] = shape.head_points();
    for (x, y) in [a, b] {
        let length = ((x - 200.0).powi(2) + y.powi(2)).sqrt();
        assert!((length - 100.0).abs() < 1e-9);
        assert!(x < 200.0);
    }
    // Symmetric about the shaft
    assert!((a.1 + b.1).abs() < 1e-9);
}

#[test]
fn test_line_grows_and_hits() {
    let mut line = Line::new("#ffffff", 10.0, 0.0, 0.0);
    line.update(&ElementUpdate::end(100.0, 0.0));
    assert_eq!(line.traces(), &[Trace::new(0.0, 0.0), Trace::new(100.0, 0.0)]);

    assert_eq!(
        line.is_inside(50.0, 2.0).map(|hit| hit.position_type),
        Some(PositionType::Content)
    );
    assert!(line.is_inside(50.0, 30.0).is_none());

    line.resize(PositionType::RightBottom, 40.0, 40.0);
    assert_eq!(line.traces().len(), 2);
    assert_eq!(line.bounds(), (0.0, 0.0, 100.0, 0.0));
}

#[test]
fn test_line_paint_path() {
    let mut line = Line::new("#ffffff", 10.0, 0.0, 0.0);
    for (x, y) in [(10.0, 0.0), (20.0, 10.0), (30.0, 10.0)] {
        line.update(&ElementUpdate::end(x, y));
    }

    let mut surface = RecordingSurface::default();
    line.paint(&mut surface);

    let path: Vec<DrawCall> = surface
        .calls()
        .iter()
        .filter(|call| {
            matches!(
                call,
                DrawCall::MoveTo { .. }
                    | DrawCall::LineTo { .. }
                    | DrawCall::QuadraticCurveTo { .. }
            )
        })
        .cloned()
        .collect();
    assert_eq!(
        path,
        vec![
            DrawCall::MoveTo { x: 0.0, y: 0.0 },
            DrawCall::QuadraticCurveTo { cpx: 10.0, cpy: 0.0, x: 15.0, y: 5.0 },
            DrawCall::QuadraticCurveTo { cpx: 20.0, cpy: 10.0, x: 25.0, y: 10.0 },
            DrawCall::LineTo { x: 30.0, y: 10.0 },
        ]
    );
}

#[test]
fn test_line_update_replaces_traces() {
    let mut line = Line::new("#ffffff", 10.0, 0.0, 0.0);
    line.update(&ElementUpdate {
        traces: Some(vec![Trace::new(5.0, 5.0), Trace::new(6.0, 6.0)]),
        ..Default::default()
    });
    assert_eq!(line.traces().len(), 2);

    line.update(&ElementUpdate {
        traces: Some(Vec::new()),
        ..Default::default()
    });
    assert_eq!(line.traces().len(), 2);
}

#[test]
fn test_text_needs_metrics_before_hit_testing() {
    let mut text = Text::new("#ffffff", 20.0, 10.0, 10.0, "note");
    assert_eq!(text.font_size(), 100.0);
    assert!(text.is_inside(20.0, 20.0).is_none());

    let mut surface = RecordingSurface::default();
    text.paint(&mut surface);
    let metrics = text.metrics().unwrap();
    assert_eq!(metrics.width, 200.0);
    assert_eq!(metrics.height(), 100.0);

    assert_eq!(
        text.is_inside(20.0, 20.0).map(|hit| hit.position_type),
        Some(PositionType::Content)
    );
    assert!(text.is_inside(211.0, 20.0).is_none());
    assert!(surface.calls().contains(&DrawCall::FillText {
        text: "note".to_owned(),
        x: 10.0,
        y: 10.0
    }));

    text.resize(PositionType::RightBottom, 50.0, 50.0);
    assert_eq!((text.begin_x, text.begin_y), (10.0, 10.0));
}

#[test]
fn test_selection_box_only_when_selected() {
    let mut shape = rect((10.0, 10.0), (110.0, 60.0), 10.0);
    let mut surface = RecordingSurface::default();
    shape.selected(&mut surface);
    assert!(surface.calls().is_empty());

    shape.set_selected(true);
    shape.selected(&mut surface);
    assert!(surface.calls().contains(&DrawCall::StrokeRect {
        x: 10.0 - DOTTED_LINE_OFFSET,
        y: 10.0 - DOTTED_LINE_OFFSET,
        width: 100.0 + 2.0 * DOTTED_LINE_OFFSET,
        height: 50.0 + 2.0 * DOTTED_LINE_OFFSET,
    }));
    assert!(surface.line_dash().is_empty());
}

#[test]
fn test_partial_updates() {
    let mut shape = rect((10.0, 10.0), (110.0, 60.0), 10.0);

    shape.update(&ElementUpdate {
        begin_x: Some(0.0),
        line_width: Some(30.0),
        ..Default::default()
    });
    assert_eq!(shape.begin_x, 0.0);
    assert_eq!(shape.begin_y, 10.0);
    assert_eq!(shape.style().line_width, 30.0);

    // Non-positive widths would break hit testing, so they are ignored
    shape.update(&ElementUpdate {
        line_width: Some(0.0),
        color: Some("#123456".to_owned()),
        ..Default::default()
    });
    assert_eq!(shape.style().line_width, 30.0);
    assert_eq!(shape.style().color, "#123456");

    let mut text = Text::new("#ffffff", 20.0, 10.0, 10.0, "before");
    text.update(&ElementUpdate {
        text: Some("after".to_owned()),
        end_x: Some(500.0),
        ..Default::default()
    });
    assert_eq!(text.text(), "after");
    assert_eq!((text.begin_x, text.begin_y), (10.0, 10.0));
}
