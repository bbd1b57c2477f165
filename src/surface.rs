//! The 2D paint surface the board draws onto.
//!
//! The board only ever talks to a [`Surface`]; the interactive backend lives
//! in [`crate::renderer`], and [`RecordingSurface`] is an offline backend that
//! records every call.

use crate::background::BackgroundImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Measured extent of a laid-out text run.
///
/// Text is drawn with a top baseline, so `ascent + descent` is the height
/// of the run below its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl TextMetrics {
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Canvas-style drawing backend.
///
/// Paths are accumulated between [`Surface::begin_path`] and
/// [`Surface::stroke`]; styles persist until changed. All coordinates are in
/// canvas pixel space.
pub trait Surface {
    /// Width of the canvas in pixels
    fn width(&self) -> f64;

    /// Height of the canvas in pixels
    fn height(&self) -> f64;

    /// Resize the canvas backing store
    fn set_size(&mut self, width: f64, height: f64);

    /// Erase everything drawn inside the given rectangle
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);

    /// Add an axis-aligned elliptical arc from `start_angle` to `end_angle`
    /// (radians, clockwise in canvas space) to the current path
    #[allow(clippy::too_many_arguments)]
    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start_angle: f64, end_angle: f64);

    /// Stroke the current path with the current stroke style
    fn stroke(&mut self);

    /// Stroke a rectangle outline without touching the current path
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn set_stroke_style(&mut self, color: &str);

    fn set_fill_style(&mut self, color: &str);

    fn set_line_width(&mut self, width: f64);

    fn set_line_cap(&mut self, cap: LineCap);

    fn set_line_join(&mut self, join: LineJoin);

    /// Alternating dash/gap lengths; an empty slice means a solid line
    fn set_line_dash(&mut self, segments: &[f64]);

    fn set_font_size(&mut self, size: f64);

    /// Measure `text` in the current font
    fn measure_text(&mut self, text: &str) -> TextMetrics;

    /// Fill `text` with its top-left corner at `(x, y)`
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Draw `image` stretched to the given rectangle
    fn draw_image(&mut self, image: &BackgroundImage, x: f64, y: f64, width: f64, height: f64);
}

/// A single recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    SetSize { width: f64, height: f64 },
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cpx: f64, cpy: f64, x: f64, y: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64, start_angle: f64, end_angle: f64 },
    Stroke,
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
    SetStrokeStyle(String),
    SetFillStyle(String),
    SetLineWidth(f64),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    SetLineDash(Vec<f64>),
    SetFontSize(f64),
    MeasureText(String),
    FillText { text: String, x: f64, y: f64 },
    DrawImage { width: f64, height: f64 },
}

/// Offline backend: records calls and reports deterministic text metrics.
///
/// Glyphs are measured as `0.5 × font size` wide, with an ascent of
/// `0.8 × font size` and a descent of `0.2 × font size`.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    font_size: f64,
    line_dash: Vec<f64>,
    calls: Vec<DrawCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        // Same default size as an unconfigured HTML canvas
        Self::new(300.0, 150.0)
    }
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            font_size: 10.0,
            line_dash: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Every call recorded so far, oldest first
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget recorded calls, keeping the current style state
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// The dash pattern currently in effect
    pub fn line_dash(&self) -> &[f64] {
        &self.line_dash
    }

    fn record(&mut self, call: DrawCall) {
        self.calls.push(call);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.record(DrawCall::SetSize { width, height });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(DrawCall::ClearRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.record(DrawCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(DrawCall::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(DrawCall::LineTo { x, y });
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.record(DrawCall::QuadraticCurveTo { cpx, cpy, x, y });
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start_angle: f64, end_angle: f64) {
        self.record(DrawCall::Ellipse {
            cx,
            cy,
            rx,
            ry,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        self.record(DrawCall::Stroke);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(DrawCall::StrokeRect { x, y, width, height });
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.record(DrawCall::SetStrokeStyle(color.to_owned()));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.record(DrawCall::SetFillStyle(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(DrawCall::SetLineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.record(DrawCall::SetLineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.record(DrawCall::SetLineJoin(join));
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.line_dash = segments.to_vec();
        self.record(DrawCall::SetLineDash(segments.to_vec()));
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
        self.record(DrawCall::SetFontSize(size));
    }

    fn measure_text(&mut self, text: &str) -> TextMetrics {
        self.record(DrawCall::MeasureText(text.to_owned()));
        TextMetrics {
            width: text.chars().count() as f64 * self.font_size * 0.5,
            ascent: self.font_size * 0.8,
            descent: self.font_size * 0.2,
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.record(DrawCall::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn draw_image(&mut self, _image: &BackgroundImage, _x: f64, _y: f64, width: f64, height: f64) {
        self.record(DrawCall::DrawImage { width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_metrics() {
        let mut surface = RecordingSurface::default();
        surface.set_font_size(100.0);
        let metrics = surface.measure_text("abcd");

        assert_eq!(metrics.width, 200.0);
        assert_eq!(metrics.ascent, 80.0);
        assert_eq!(metrics.descent, 20.0);
        assert_eq!(metrics.height(), 100.0);
    }

    #[test]
    fn test_recording_surface_tracks_dash_and_size() {
        let mut surface = RecordingSurface::default();
        assert_eq!(surface.width(), 300.0);
        assert_eq!(surface.height(), 150.0);

        surface.set_line_dash(&[20.0, 50.0]);
        assert_eq!(surface.line_dash(), &[20.0, 50.0]);
        surface.set_line_dash(&[]);
        assert!(surface.line_dash().is_empty());

        surface.set_size(640.0, 480.0);
        assert_eq!(surface.width(), 640.0);
        assert_eq!(surface.calls().len(), 3);
        assert_eq!(surface.take_calls().len(), 3);
        assert!(surface.calls().is_empty());
    }
}
