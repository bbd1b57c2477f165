use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::BrushError;
use crate::geometry::Trace;
use crate::surface::{LineCap, Surface};

/// Width used when a shape is created with an unusable line width
pub const DEFAULT_LINE_WIDTH: f64 = 20.0;

// Selection indicator drawn around the selected shape
pub const DOTTED_LINE_COLOR: &str = "#ffffff";
pub const DOTTED_LINE_DASH: [f64; 2] = [20.0, 50.0];
pub const DOTTED_LINE_OFFSET: f64 = 30.0;
pub const DOTTED_LINE_WIDTH: f64 = 5.0;

/// Tool mode, doubling as the variant tag of exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    Rect,
    Ellipse,
    Arrow,
    Line,
    Text,
}

impl OperationMode {
    pub const ALL: [OperationMode; 5] = [
        OperationMode::Rect,
        OperationMode::Ellipse,
        OperationMode::Arrow,
        OperationMode::Line,
        OperationMode::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationMode::Rect => "rect",
            OperationMode::Ellipse => "ellipse",
            OperationMode::Arrow => "arrow",
            OperationMode::Line => "line",
            OperationMode::Text => "text",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = BrushError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| BrushError::UnsupportedShapeMode(s.to_owned()))
    }
}

/// Pointer cursor to show over a hit region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    Move,
    #[default]
    Default,
    NsResize,
    EwResize,
    NwseResize,
    NeswResize,
}

impl CursorStyle {
    /// CSS cursor name
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorStyle::Move => "move",
            CursorStyle::Default => "default",
            CursorStyle::NsResize => "ns-resize",
            CursorStyle::EwResize => "ew-resize",
            CursorStyle::NwseResize => "nwse-resize",
            CursorStyle::NeswResize => "nesw-resize",
        }
    }
}

/// Which part of a shape a pointer landed on.
///
/// Corner and edge names are relative to the shape's anchors: `LeftTop` is the
/// begin anchor's corner and `RightBottom` the end anchor's, whatever way the
/// shape was drawn. `Top`/`Bottom` on an arrow are its tail and head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionType {
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
    Top,
    Bottom,
    Left,
    Right,
    Content,
}

impl PositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionType::LeftTop => "left-top",
            PositionType::LeftBottom => "left-bottom",
            PositionType::RightTop => "right-top",
            PositionType::RightBottom => "right-bottom",
            PositionType::Top => "top",
            PositionType::Bottom => "bottom",
            PositionType::Left => "left",
            PositionType::Right => "right",
            PositionType::Content => "content",
        }
    }
}

/// Outcome of a successful hit test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitResult {
    pub cursor_style: CursorStyle,
    pub position_type: PositionType,
}

impl HitResult {
    pub fn new(cursor_style: CursorStyle, position_type: PositionType) -> Self {
        Self {
            cursor_style,
            position_type,
        }
    }

    /// A hit on the shape body, which drags the whole shape
    pub fn content() -> Self {
        Self::new(CursorStyle::Move, PositionType::Content)
    }
}

/// Partial field update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementUpdate {
    pub color: Option<String>,
    pub line_width: Option<f64>,
    pub begin_x: Option<f64>,
    pub begin_y: Option<f64>,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
    pub traces: Option<Vec<Trace>>,
    pub text: Option<String>,
}

impl ElementUpdate {
    /// Move the gesture end point (appends a trace on freehand lines)
    pub fn end(x: f64, y: f64) -> Self {
        Self {
            end_x: Some(x),
            end_y: Some(y),
            ..Default::default()
        }
    }
}

/// Style-only update applied to the selected shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleUpdate {
    pub color: Option<String>,
    pub line_width: Option<f64>,
}

impl From<StyleUpdate> for ElementUpdate {
    fn from(style: StyleUpdate) -> Self {
        Self {
            color: style.color,
            line_width: style.line_width,
            ..Default::default()
        }
    }
}

/// Exported shape record. Which optional fields are present depends on
/// `operation_mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementData {
    pub color: String,
    pub line_width: f64,
    pub operation_mode: OperationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traces: Option<Vec<Trace>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ElementData {
    pub(crate) fn new(style: &ElementStyle, operation_mode: OperationMode) -> Self {
        Self {
            color: style.color.clone(),
            line_width: style.line_width,
            operation_mode,
            begin_x: None,
            begin_y: None,
            end_x: None,
            end_y: None,
            traces: None,
            text: None,
        }
    }

    pub(crate) fn with_anchors(
        mut self,
        begin_x: f64,
        begin_y: f64,
        end_x: f64,
        end_y: f64,
    ) -> Self {
        self.begin_x = Some(begin_x);
        self.begin_y = Some(begin_y);
        self.end_x = Some(end_x);
        self.end_y = Some(end_y);
        self
    }

    /// Fetch a field the record's mode requires
    pub(crate) fn required<T: Clone>(
        &self,
        field: &Option<T>,
        name: &str,
    ) -> Result<T, BrushError> {
        field.clone().ok_or_else(|| {
            BrushError::InvalidRecord(format!(
                "{} record is missing `{}`",
                self.operation_mode, name
            ))
        })
    }

    /// Like [`Self::required`], for a coordinate that must also be finite
    pub(crate) fn coordinate(&self, field: &Option<f64>, name: &str) -> Result<f64, BrushError> {
        let value = self.required(field, name)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.invalid(format!("`{name}` is not finite")))
        }
    }

    /// Check the fields every record carries
    pub(crate) fn validate_style(&self) -> Result<(), BrushError> {
        if is_valid_line_width(self.line_width) {
            Ok(())
        } else {
            Err(self.invalid(format!("invalid `lineWidth` {}", self.line_width)))
        }
    }

    pub(crate) fn invalid(&self, reason: String) -> BrushError {
        BrushError::InvalidRecord(format!("{} record: {}", self.operation_mode, reason))
    }
}

/// Line widths must be finite and positive
pub fn is_valid_line_width(width: f64) -> bool {
    width.is_finite() && width > 0.0
}

/// Stroke style and selection flag shared by every variant
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub color: String,
    pub line_width: f64,
    pub is_selected: bool,
}

impl ElementStyle {
    /// A non-positive or non-finite `line_width` falls back to [`DEFAULT_LINE_WIDTH`]
    pub fn new(color: impl Into<String>, line_width: f64) -> Self {
        let line_width = if is_valid_line_width(line_width) {
            line_width
        } else {
            warn!("Invalid line width {}, using {}", line_width, DEFAULT_LINE_WIDTH);
            DEFAULT_LINE_WIDTH
        };
        Self {
            color: color.into(),
            line_width,
            is_selected: false,
        }
    }

    /// Apply the style part of an update
    pub(crate) fn apply(&mut self, update: &ElementUpdate) {
        if let Some(color) = &update.color {
            self.color.clone_from(color);
        }
        match update.line_width {
            Some(width) if is_valid_line_width(width) => self.line_width = width,
            Some(width) => warn!("Ignoring invalid line width {}", width),
            None => {}
        }
    }

    pub(crate) fn half_line_width(&self) -> f64 {
        self.line_width / 2.0
    }
}

/// Copy each present coordinate of the update into the given anchors
pub(crate) fn apply_anchors(
    update: &ElementUpdate,
    begin_x: &mut f64,
    begin_y: &mut f64,
    end: Option<(&mut f64, &mut f64)>,
) {
    if let Some(x) = update.begin_x {
        *begin_x = x;
    }
    if let Some(y) = update.begin_y {
        *begin_y = y;
    }
    if let Some((end_x, end_y)) = end {
        if let Some(x) = update.end_x {
            *end_x = x;
        }
        if let Some(y) = update.end_y {
            *end_y = y;
        }
    }
}

/// Draw the dashed selection box around `(x, y, width, height)`, padded by
/// [`DOTTED_LINE_OFFSET`] on every side. The dash pattern is reset afterwards.
pub(crate) fn draw_dotted_rect(surface: &mut dyn Surface, x: f64, y: f64, width: f64, height: f64) {
    surface.begin_path();
    surface.set_line_dash(&DOTTED_LINE_DASH);
    surface.set_stroke_style(DOTTED_LINE_COLOR);
    surface.set_line_width(DOTTED_LINE_WIDTH);
    surface.set_line_cap(LineCap::Round);
    surface.stroke_rect(
        x - DOTTED_LINE_OFFSET,
        y - DOTTED_LINE_OFFSET,
        width + DOTTED_LINE_OFFSET * 2.0,
        height + DOTTED_LINE_OFFSET * 2.0,
    );
    surface.set_line_dash(&[]);
}

/// Stroke style setup shared by every outline shape
pub(crate) fn begin_stroke(surface: &mut dyn Surface, style: &ElementStyle) {
    surface.begin_path();
    surface.set_stroke_style(&style.color);
    surface.set_line_width(style.line_width);
}
