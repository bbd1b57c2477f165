use uuid::Uuid;

use super::common::{
    apply_anchors, begin_stroke, draw_dotted_rect, CursorStyle, ElementData, ElementStyle,
    ElementUpdate, HitResult, OperationMode, PositionType,
};
use super::Element;
use crate::geometry::{is_point_in_rectangle, is_top_left_to_bottom_right};
use crate::surface::Surface;

/// Axis-aligned rectangle outline spanned by two anchors
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    id: Uuid,
    style: ElementStyle,
    pub begin_x: f64,
    pub begin_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Rectangle {
    /// A zero-sized rectangle at the gesture's start point
    pub fn new(color: impl Into<String>, line_width: f64, begin_x: f64, begin_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            style: ElementStyle::new(color, line_width),
            begin_x,
            begin_y,
            end_x: begin_x,
            end_y: begin_y,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.begin_x.min(self.end_x)
    }

    pub fn max_x(&self) -> f64 {
        self.begin_x.max(self.end_x)
    }

    pub fn min_y(&self) -> f64 {
        self.begin_y.min(self.end_y)
    }

    pub fn max_y(&self) -> f64 {
        self.begin_y.max(self.end_y)
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
}

impl Element for Rectangle {
    fn id(&self) -> Uuid {
        self.id
    }

    fn operation_mode(&self) -> OperationMode {
        OperationMode::Rect
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        begin_stroke(surface, &self.style);
        surface.stroke_rect(
            self.min_x(),
            self.min_y(),
            self.max_x() - self.min_x(),
            self.max_y() - self.min_y(),
        );

        if self.style.is_selected {
            self.selected(surface);
        }
    }

    fn is_inside(&self, x: f64, y: f64) -> Option<HitResult> {
        // Each border band is one line width wide, centred on the stroke.
        // "top"/"left" refer to the begin anchor, "bottom"/"right" to the end anchor.
        let half = self.style.half_line_width();
        let (begin_x, begin_y, end_x, end_y) = (self.begin_x, self.begin_y, self.end_x, self.end_y);
        let (x_step, y_step) = (
            if begin_x <= end_x { half } else { -half },
            if begin_y <= end_y { half } else { -half },
        );

        let border_left = begin_x - x_step;
        let content_left = begin_x + x_step;
        let content_right = end_x - x_step;
        let border_right = end_x + x_step;
        let border_top = begin_y - y_step;
        let content_top = begin_y + y_step;
        let content_bottom = end_y - y_step;
        let border_bottom = end_y + y_step;

        let nw_se = is_top_left_to_bottom_right(begin_x, begin_y, end_x, end_y);
        let zone = |x1, y1, x2, y2| is_point_in_rectangle(x, y, x1, y1, x2, y2);

        let left_top = zone(border_left, border_top, content_left, content_top);
        let right_bottom = zone(content_right, content_bottom, border_right, border_bottom);
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

        let right_top = zone(content_right, border_top, border_right, content_top);
        let left_bottom = zone(border_left, content_bottom, content_left, border_bottom);
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

        let top = zone(content_left, border_top, content_right, content_top);
        let bottom = zone(content_left, content_bottom, content_right, border_bottom);
        if top || bottom {
            return Some(HitResult::new(
                CursorStyle::NsResize,
                if top {
                    PositionType::Top
                } else {
                    PositionType::Bottom
                },
            ));
        }

        let left = zone(border_left, content_top, content_left, content_bottom);
        let right = zone(content_right, content_top, border_right, content_bottom);
        if left || right {
            return Some(HitResult::new(
                CursorStyle::EwResize,
                if left {
                    PositionType::Left
                } else {
                    PositionType::Right
                },
            ));
        }

        if zone(content_left, content_top, content_right, content_bottom) {
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
            self.min_x(),
            self.min_y(),
            self.max_x() - self.min_x(),
            self.max_y() - self.min_y(),
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
            PositionType::Top => self.begin_y += dy,
            PositionType::Left => self.begin_x += dx,
            PositionType::Bottom => self.end_y += dy,
            PositionType::Right => self.end_x += dx,
            PositionType::Content => {}
        }
    }

    fn to_data(&self) -> ElementData {
        ElementData::new(&self.style, OperationMode::Rect).with_anchors(
            self.begin_x,
            self.begin_y,
            self.end_x,
            self.end_y,
        )
    }
}
