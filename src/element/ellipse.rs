use std::f64::consts::{FRAC_PI_2, PI};

use uuid::Uuid;

use super::common::{
    apply_anchors, begin_stroke, draw_dotted_rect, CursorStyle, ElementData, ElementStyle,
    ElementUpdate, HitResult, OperationMode, PositionType,
};
use super::Element;
use crate::geometry::{
    is_point_in_ellipse, is_point_on_elliptical_arc_border, is_top_left_to_bottom_right,
};
use crate::surface::Surface;

/// Extent of a freshly created ellipse before the gesture moves its end anchor
pub const DEFAULT_EXTENT: f64 = 50.0;

/// Angle range `[start, end]` of one quarter of the outline
type Quadrant = (f64, f64);

/// Which quarter of the outline belongs to each anchor-relative corner
struct QuadrantAngles {
    left_top: Quadrant,
    right_bottom: Quadrant,
    right_top: Quadrant,
    left_bottom: Quadrant,
}

const SOUTH_EAST: Quadrant = (0.0, FRAC_PI_2);
const SOUTH_WEST: Quadrant = (FRAC_PI_2, PI);
const NORTH_WEST: Quadrant = (PI, 1.5 * PI);
const NORTH_EAST: Quadrant = (1.5 * PI, 2.0 * PI);

/// Ellipse inscribed in the box spanned by two anchors
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    id: Uuid,
    style: ElementStyle,
    pub begin_x: f64,
    pub begin_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Ellipse {
    pub fn new(color: impl Into<String>, line_width: f64, begin_x: f64, begin_y: f64) -> Self {
        Self::from_parts(
            ElementStyle::new(color, line_width),
            (begin_x, begin_y),
            (begin_x + DEFAULT_EXTENT, begin_y + DEFAULT_EXTENT),
        )
    }

    pub(crate) fn from_parts(style: ElementStyle, begin: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            id: Uuid::new_v4(),
            style,
            begin_x: begin.0,
            begin_y: begin.1,
            end_x: end.0,
            end_y: end.1,
        }
    }

    pub fn radius_x(&self) -> f64 {
        (self.begin_x - self.end_x).abs() / 2.0
    }

    pub fn radius_y(&self) -> f64 {
        (self.begin_y - self.end_y).abs() / 2.0
    }

    pub fn center_x(&self) -> f64 {
        self.begin_x.min(self.end_x) + self.radius_x()
    }

    pub fn center_y(&self) -> f64 {
        self.begin_y.min(self.end_y) + self.radius_y()
    }

    /// Map anchor-relative corners onto outline quadrants, depending on where
    /// the begin anchor sits relative to the end anchor.
    fn calculate_angle(&self) -> QuadrantAngles {
        let begin_left = self.begin_x <= self.end_x;
        let begin_above = self.begin_y <= self.end_y;

        match (begin_left, begin_above) {
            (true, true) => QuadrantAngles {
                left_top: NORTH_WEST,
                right_bottom: SOUTH_EAST,
                right_top: NORTH_EAST,
                left_bottom: SOUTH_WEST,
            },
            (true, false) => QuadrantAngles {
                left_top: SOUTH_WEST,
                right_bottom: NORTH_EAST,
                right_top: SOUTH_EAST,
                left_bottom: NORTH_WEST,
            },
            (false, true) => QuadrantAngles {
                left_top: NORTH_EAST,
                right_bottom: SOUTH_WEST,
                right_top: NORTH_WEST,
                left_bottom: SOUTH_EAST,
            },
            (false, false) => QuadrantAngles {
                left_top: SOUTH_EAST,
                right_bottom: NORTH_WEST,
                right_top: SOUTH_WEST,
                left_bottom: NORTH_EAST,
            },
        }
    }

    fn is_on_arc(&self, x: f64, y: f64, (start, end): Quadrant) -> bool {
        is_point_on_elliptical_arc_border(
            x,
            y,
            self.center_x(),
            self.center_y(),
            self.radius_x(),
            self.radius_y(),
            start,
            end,
            self.style.line_width,
        )
    }
}

impl Element for Ellipse {
    fn id(&self) -> Uuid {
        self.id
    }

    fn operation_mode(&self) -> OperationMode {
        OperationMode::Ellipse
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        begin_stroke(surface, &self.style);
        surface.ellipse(
            self.center_x(),
            self.center_y(),
            self.radius_x(),
            self.radius_y(),
            0.0,
            2.0 * PI,
        );
        surface.stroke();

        if self.style.is_selected {
            self.selected(surface);
        }
    }

    fn is_inside(&self, x: f64, y: f64) -> Option<HitResult> {
        let angles = self.calculate_angle();
        let nw_se = is_top_left_to_bottom_right(self.begin_x, self.begin_y, self.end_x, self.end_y);

        let left_top = self.is_on_arc(x, y, angles.left_top);
        let right_bottom = self.is_on_arc(x, y, angles.right_bottom);
        if left_top || right_bottom {
            return Some(HitResult::new(
                if nw_se {
                    CursorStyle::NwseResize
                } else {
                    CursorStyle::NeswResize
                },
                if left_top {
                    PositionType::LeftTop
                } else {
                    PositionType::RightBottom
                },
            ));
        }

        let right_top = self.is_on_arc(x, y, angles.right_top);
        let left_bottom = self.is_on_arc(x, y, angles.left_bottom);
        if right_top || left_bottom {
            return Some(HitResult::new(
                if nw_se {
                    CursorStyle::NeswResize
                } else {
                    CursorStyle::NwseResize
                },
                if right_top {
                    PositionType::RightTop
                } else {
                    PositionType::LeftBottom
                },
            ));
        }

        let half = self.style.half_line_width();
        if is_point_in_ellipse(
            x,
            y,
            self.center_x(),
            self.center_y(),
            self.radius_x() - half,
            self.radius_y() - half,
        ) {
            return Some(HitResult::content());
        }

        None
    }

    fn selected(&self, surface: &mut dyn Surface) {
        if !self.style.is_selected {
            return;
        }
        draw_dotted_rect(
            surface,
            self.begin_x.min(self.end_x),
            self.begin_y.min(self.end_y),
            self.radius_x() * 2.0,
            self.radius_y() * 2.0,
        );
    }

    fn update(&mut self, update: &ElementUpdate) {
        self.style.apply(update);
        apply_anchors(
            update,
            &mut self.begin_x,
            &mut self.begin_y,
            Some((&mut self.end_x, &mut self.end_y)),
        );
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.begin_x += dx;
        self.begin_y += dy;
        self.end_x += dx;
        self.end_y += dy;
    }

    fn resize(&mut self, position: PositionType, dx: f64, dy: f64) {
        match position {
            PositionType::LeftTop => {
                self.begin_x += dx;
                self.begin_y += dy;
            }
            PositionType::RightTop => {
                self.end_x += dx;
                self.begin_y += dy;
            }
            PositionType::LeftBottom => {
                self.begin_x += dx;
                self.end_y += dy;
            }
            PositionType::RightBottom => {
                self.end_x += dx;
                self.end_y += dy;
            }
            // Ellipses only resize from their corners
            _ => {}
        }
    }

    fn to_data(&self) -> ElementData {
        ElementData::new(&self.style, OperationMode::Ellipse).with_anchors(
            self.begin_x,
            self.begin_y,
            self.end_x,
            self.end_y,
        )
    }
}
