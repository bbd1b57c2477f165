use std::f64::consts::FRAC_PI_6;

use uuid::Uuid;

use super::common::{
    apply_anchors, begin_stroke, draw_dotted_rect, CursorStyle, ElementData, ElementStyle,
    ElementUpdate, HitResult, OperationMode, PositionType,
};
use super::Element;
use crate::geometry::{point_to_point_distance, point_to_segment_distance};
use crate::surface::{LineCap, LineJoin, Surface};

/// Length of each arrowhead stroke
pub const HEAD_LENGTH: f64 = 100.0;
/// Angle between the shaft and each arrowhead stroke
pub const HEAD_ANGLE: f64 = FRAC_PI_6;
/// Offset of a freshly created arrow's head from its tail
pub const DEFAULT_EXTENT: f64 = 100.0;

/// Straight arrow pointing from the begin anchor (tail) to the end anchor (head)
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    id: Uuid,
    style: ElementStyle,
    pub begin_x: f64,
    pub begin_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Arrow {
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

    /// End points of the two arrowhead strokes
    pub fn head_points(&self) -> [(f64, f64); 2] {
        let angle = (self.end_y - self.begin_y).atan2(self.end_x - self.begin_x);
        [angle - HEAD_ANGLE, angle + HEAD_ANGLE].map(|side| {
            (
                self.end_x - HEAD_LENGTH * side.cos(),
                self.end_y - HEAD_LENGTH * side.sin(),
            )
        })
    }
}

impl Element for Arrow {
    fn id(&self) -> Uuid {
        self.id
    }

    fn operation_mode(&self) -> OperationMode {
        OperationMode::Arrow
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        begin_stroke(surface, &self.style);
        surface.set_line_cap(LineCap::Round);
        surface.set_line_join(LineJoin::Round);
        surface.move_to(self.begin_x, self.begin_y);
        surface.line_to(self.end_x, self.end_y);
        surface.stroke();

        surface.begin_path();
        for (x, y) in self.head_points() {
            surface.move_to(self.end_x, self.end_y);
            surface.line_to(x, y);
        }
        surface.stroke();

        if self.style.is_selected {
            self.selected(surface);
        }
    }

    fn is_inside(&self, x: f64, y: f64) -> Option<HitResult> {
        let half = self.style.half_line_width();

        let tail = point_to_point_distance(x, y, self.begin_x, self.begin_y) <= half;
        let head = point_to_point_distance(x, y, self.end_x, self.end_y) <= half;
        if tail || head {
            return Some(HitResult::new(
                CursorStyle::NsResize,
                if tail {
                    PositionType::Top
                } else {
                    PositionType::Bottom
                },
            ));
        }

        let shaft =
            point_to_segment_distance(x, y, self.begin_x, self.begin_y, self.end_x, self.end_y);
        if shaft <= half {
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
            (self.begin_x - self.end_x).abs(),
            (self.begin_y - self.end_y).abs(),
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
            PositionType::Top => {
                self.begin_x += dx;
                self.begin_y += dy;
            }
            PositionType::Bottom => {
                self.end_x += dx;
                self.end_y += dy;
            }
            _ => {}
        }
    }

    fn to_data(&self) -> ElementData {
        ElementData::new(&self.style, OperationMode::Arrow).with_anchors(
            self.begin_x,
            self.begin_y,
            self.end_x,
            self.end_y,
        )
    }
}
