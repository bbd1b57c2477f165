use uuid::Uuid;

mod common;
pub mod arrow;
pub mod ellipse;
pub mod line;
pub mod rectangle;
pub mod text;

pub use arrow::Arrow;
pub use common::{
    is_valid_line_width, CursorStyle, ElementData, ElementStyle, ElementUpdate, HitResult,
    OperationMode, PositionType, StyleUpdate, DEFAULT_LINE_WIDTH, DOTTED_LINE_COLOR,
    DOTTED_LINE_DASH, DOTTED_LINE_OFFSET, DOTTED_LINE_WIDTH,
};
pub use ellipse::Ellipse;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::Text;

use crate::error::{BrushError, BrushResult};
use crate::surface::Surface;

/// Capabilities every shape on the board provides
pub trait Element {
    /// Identity of this shape, stable across moves between the undo and redo stacks
    fn id(&self) -> Uuid;

    /// The tool mode that creates this kind of shape
    fn operation_mode(&self) -> OperationMode;

    fn style(&self) -> &ElementStyle;

    fn style_mut(&mut self) -> &mut ElementStyle;

    /// Draw the shape, followed by its selection box when selected
    fn paint(&mut self, surface: &mut dyn Surface);

    /// Hit test a canvas point, reporting the cursor and the part of the shape under it
    fn is_inside(&self, x: f64, y: f64) -> Option<HitResult>;

    /// Draw the dashed selection box; does nothing when not selected
    fn selected(&self, surface: &mut dyn Surface);

    /// Apply a partial update
    fn update(&mut self, update: &ElementUpdate);

    /// Move the whole shape by the given delta
    fn translate(&mut self, dx: f64, dy: f64);

    /// Drag the handle identified by `position` by the given delta
    fn resize(&mut self, position: PositionType, dx: f64, dy: f64);

    /// Export as a plain record
    fn to_data(&self) -> ElementData;

    fn is_selected(&self) -> bool {
        self.style().is_selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.style_mut().is_selected = selected;
    }
}

/// Every kind of shape the board can hold
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Rect(Rectangle),
    Ellipse(Ellipse),
    Arrow(Arrow),
    Line(Line),
    Text(Text),
}

impl ElementType {
    /// Rebuild a shape from an exported record.
    ///
    /// Fails with [`BrushError::InvalidRecord`] when a field the mode needs is
    /// missing, the line width is not positive, or a coordinate is not finite.
    pub fn from_data(data: &ElementData) -> BrushResult<Self> {
        data.validate_style()?;
        let style = ElementStyle::new(data.color.clone(), data.line_width);
        let anchor = |x: &Option<f64>, y: &Option<f64>, x_name: &str, y_name: &str| {
            Ok::<_, BrushError>((data.coordinate(x, x_name)?, data.coordinate(y, y_name)?))
        };

        let element = match data.operation_mode {
            OperationMode::Rect => ElementType::Rect(Rectangle::from_parts(
                style,
                anchor(&data.begin_x, &data.begin_y, "beginX", "beginY")?,
                anchor(&data.end_x, &data.end_y, "endX", "endY")?,
            )),
            OperationMode::Ellipse => ElementType::Ellipse(Ellipse::from_parts(
                style,
                anchor(&data.begin_x, &data.begin_y, "beginX", "beginY")?,
                anchor(&data.end_x, &data.end_y, "endX", "endY")?,
            )),
            OperationMode::Arrow => ElementType::Arrow(Arrow::from_parts(
                style,
                anchor(&data.begin_x, &data.begin_y, "beginX", "beginY")?,
                anchor(&data.end_x, &data.end_y, "endX", "endY")?,
            )),
            OperationMode::Line => {
                let traces = data.required(&data.traces, "traces")?;
                if traces.iter().any(|t| !t.pos_x.is_finite() || !t.pos_y.is_finite()) {
                    return Err(data.invalid("trace is not finite".to_owned()));
                }
                let line = Line::from_parts(style, traces)
                    .ok_or_else(|| data.invalid("no traces".to_owned()))?;
                ElementType::Line(line)
            }
            OperationMode::Text => ElementType::Text(Text::from_parts(
                style,
                anchor(&data.begin_x, &data.begin_y, "beginX", "beginY")?,
                data.required(&data.text, "text")?,
            )),
        };
        Ok(element)
    }
}

impl Element for ElementType {
    fn id(&self) -> Uuid {
        match self {
            ElementType::Rect(r) => r.id(),
            ElementType::Ellipse(e) => e.id(),
            ElementType::Arrow(a) => a.id(),
            ElementType::Line(l) => l.id(),
            ElementType::Text(t) => t.id(),
        }
    }

    fn operation_mode(&self) -> OperationMode {
        match self {
            ElementType::Rect(r) => r.operation_mode(),
            ElementType::Ellipse(e) => e.operation_mode(),
            ElementType::Arrow(a) => a.operation_mode(),
            ElementType::Line(l) => l.operation_mode(),
            ElementType::Text(t) => t.operation_mode(),
        }
    }

    fn style(&self) -> &ElementStyle {
        match self {
            ElementType::Rect(r) => r.style(),
            ElementType::Ellipse(e) => e.style(),
            ElementType::Arrow(a) => a.style(),
            ElementType::Line(l) => l.style(),
            ElementType::Text(t) => t.style(),
        }
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        match self {
            ElementType::Rect(r) => r.style_mut(),
            ElementType::Ellipse(e) => e.style_mut(),
            ElementType::Arrow(a) => a.style_mut(),
            ElementType::Line(l) => l.style_mut(),
            ElementType::Text(t) => t.style_mut(),
        }
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        match self {
            ElementType::Rect(r) => r.paint(surface),
            ElementType::Ellipse(e) => e.paint(surface),
            ElementType::Arrow(a) => a.paint(surface),
            ElementType::Line(l) => l.paint(surface),
            ElementType::Text(t) => t.paint(surface),
        }
    }

    fn is_inside(&self, x: f64, y: f64) -> Option<HitResult> {
        match self {
            ElementType::Rect(r) => r.is_inside(x, y),
            ElementType::Ellipse(e) => e.is_inside(x, y),
            ElementType::Arrow(a) => a.is_inside(x, y),
            ElementType::Line(l) => l.is_inside(x, y),
            ElementType::Text(t) => t.is_inside(x, y),
        }
    }

    fn selected(&self, surface: &mut dyn Surface) {
        match self {
            ElementType::Rect(r) => r.selected(surface),
            ElementType::Ellipse(e) => e.selected(surface),
            ElementType::Arrow(a) => a.selected(surface),
            ElementType::Line(l) => l.selected(surface),
            ElementType::Text(t) => t.selected(surface),
        }
    }

    fn update(&mut self, update: &ElementUpdate) {
        match self {
            ElementType::Rect(r) => r.update(update),
            ElementType::Ellipse(e) => e.update(update),
            ElementType::Arrow(a) => a.update(update),
            ElementType::Line(l) => l.update(update),
            ElementType::Text(t) => t.update(update),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            ElementType::Rect(r) => r.translate(dx, dy),
            ElementType::Ellipse(e) => e.translate(dx, dy),
            ElementType::Arrow(a) => a.translate(dx, dy),
            ElementType::Line(l) => l.translate(dx, dy),
            ElementType::Text(t) => t.translate(dx, dy),
        }
    }

    fn resize(&mut self, position: PositionType, dx: f64, dy: f64) {
        match self {
            ElementType::Rect(r) => r.resize(position, dx, dy),
            ElementType::Ellipse(e) => e.resize(position, dx, dy),
            ElementType::Arrow(a) => a.resize(position, dx, dy),
            ElementType::Line(l) => l.resize(position, dx, dy),
            ElementType::Text(t) => t.resize(position, dx, dy),
        }
    }

    fn to_data(&self) -> ElementData {
        match self {
            ElementType::Rect(r) => r.to_data(),
            ElementType::Ellipse(e) => e.to_data(),
            ElementType::Arrow(a) => a.to_data(),
            ElementType::Line(l) => l.to_data(),
            ElementType::Text(t) => t.to_data(),
        }
    }
}

/// Factory functions for creating shapes at the start of a drawing gesture
pub mod factory {
    use log::debug;

    use super::*;

    /// Create the shape for `mode`, seeded at the gesture's start point.
    /// `text` is only used by [`OperationMode::Text`].
    pub fn create_element(
        mode: OperationMode,
        color: &str,
        line_width: f64,
        x: f64,
        y: f64,
        text: Option<&str>,
    ) -> ElementType {
        debug!("Creating {} at ({}, {})", mode, x, y);
        match mode {
            OperationMode::Rect => ElementType::Rect(Rectangle::new(color, line_width, x, y)),
            OperationMode::Ellipse => ElementType::Ellipse(Ellipse::new(color, line_width, x, y)),
            OperationMode::Arrow => ElementType::Arrow(Arrow::new(color, line_width, x, y)),
            OperationMode::Line => ElementType::Line(Line::new(color, line_width, x, y)),
            OperationMode::Text => {
                ElementType::Text(Text::new(color, line_width, x, y, text.unwrap_or_default()))
            }
        }
    }

    /// Like [`create_element`], for a mode given by its tag (`"rect"`, `"line"`, ...).
    /// Fails with [`crate::BrushError::UnsupportedShapeMode`] for unknown tags.
    pub fn create_element_from_tag(
        tag: &str,
        color: &str,
        line_width: f64,
        x: f64,
        y: f64,
        text: Option<&str>,
    ) -> BrushResult<ElementType> {
        let mode: OperationMode = tag.parse()?;
        Ok(create_element(mode, color, line_width, x, y, text))
    }
}
