use uuid::Uuid;

use super::common::{
    begin_stroke, draw_dotted_rect, ElementData, ElementStyle, ElementUpdate, HitResult,
    OperationMode, PositionType,
};
use super::Element;
use crate::geometry::{is_point_on_smooth_curve, Trace};
use crate::surface::{LineCap, LineJoin, Surface};

/// Freehand line: the sequence of pointer samples of one drawing gesture
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: Uuid,
    style: ElementStyle,
    traces: Vec<Trace>,
}

impl Line {
    /// A line holding only the gesture's start point
    pub fn new(color: impl Into<String>, line_width: f64, pos_x: f64, pos_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            style: ElementStyle::new(color, line_width),
            traces: vec![Trace::new(pos_x, pos_y)],
        }
    }

    /// Returns `None` for an empty trace list, since a line always has a point
    pub(crate) fn from_parts(style: ElementStyle, traces: Vec<Trace>) -> Option<Self> {
        if traces.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            style,
            traces,
        })
    }

    /// The sampled points, in drawing order
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Bounding box of all traces as `(min_x, min_y, max_x, max_y)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let first = self.traces[0];
        self.traces.iter().fold(
            (first.pos_x, first.pos_y, first.pos_x, first.pos_y),
            |(min_x, min_y, max_x, max_y), trace| {
                (
                    min_x.min(trace.pos_x),
                    min_y.min(trace.pos_y),
                    max_x.max(trace.pos_x),
                    max_y.max(trace.pos_y),
                )
            },
        )
    }
}

impl Element for Line {
    fn id(&self) -> Uuid {
        self.id
    }

    fn operation_mode(&self) -> OperationMode {
        OperationMode::Line
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        begin_stroke(surface, &self.style);
        surface.set_line_join(LineJoin::Round);
        surface.set_line_cap(LineCap::Round);

        let first = self.traces[0];
        surface.move_to(first.pos_x, first.pos_y);

        if self.traces.len() < 2 {
            surface.line_to(first.pos_x, first.pos_y);
        } else {
            // Smooth through the samples: each inner point is a control point
            // and the curve passes through the midpoints between samples.
            for pair in self.traces[1..].windows(2) {
                let control = pair[0];
                let through = pair[0].midpoint(&pair[1]);
                surface.quadratic_curve_to(
                    control.pos_x,
                    control.pos_y,
                    through.pos_x,
                    through.pos_y,
                );
            }

            let last = self.traces[self.traces.len() - 1];
            surface.line_to(last.pos_x, last.pos_y);
        }

        surface.stroke();

        if self.style.is_selected {
            self.selected(surface);
        }
    }

    fn is_inside(&self, x: f64, y: f64) -> Option<HitResult> {
        is_point_on_smooth_curve(x, y, &self.traces, self.style.line_width)
            .then(HitResult::content)
    }

    fn selected(&self, surface: &mut dyn Surface) {
        if !self.style.is_selected {
            return;
        }
        let (min_x, min_y, max_x, max_y) = self.bounds();
        draw_dotted_rect(surface, min_x, min_y, max_x - min_x, max_y - min_y);
    }

    fn update(&mut self, update: &ElementUpdate) {
        self.style.apply(update);

        if let Some(traces) = &update.traces {
            if traces.is_empty() {
                log::warn!("Ignoring empty trace list for line {}", self.id);
            } else {
                self.traces.clone_from(traces);
            }
        }

        // A line grows with its gesture instead of moving a single end point
        if let (Some(x), Some(y)) = (update.end_x, update.end_y) {
            self.traces.push(Trace::new(x, y));
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for trace in &mut self.traces {
            trace.pos_x += dx;
            trace.pos_y += dy;
        }
    }

    fn resize(&mut self, _position: PositionType, _dx: f64, _dy: f64) {
        // Lines only move or grow
    }

    fn to_data(&self) -> ElementData {
        let mut data = ElementData::new(&self.style, OperationMode::Line);
        data.traces = Some(self.traces.clone());
        data
    }
}
