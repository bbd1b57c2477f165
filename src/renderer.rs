use std::collections::HashMap;

use egui::emath::TSTransform;
use egui::{
    Color32, ColorImage, Context, CursorIcon, FontId, Painter, Pos2, Rect, Shape, Stroke,
    TextureHandle, TextureOptions,
};
use log::{trace, warn};
use uuid::Uuid;

use crate::background::BackgroundImage;
use crate::element::CursorStyle;
use crate::surface::{LineCap, LineJoin, Surface, TextMetrics};

/// Points used to flatten one quadratic curve segment
const CURVE_SEGMENTS: usize = 16;
/// Points used to flatten a full turn of an ellipse
const ELLIPSE_SEGMENTS: usize = 96;

/// [`Surface`] backed by egui.
///
/// Draw calls build a display list in canvas pixel space; [`EguiSurface::present`]
/// paints it scaled into the on-screen canvas rectangle.
pub struct EguiSurface {
    ctx: Context,
    width: f64,
    height: f64,
    shapes: Vec<Shape>,
    subpaths: Vec<Vec<Pos2>>,
    stroke_color: Color32,
    fill_color: Color32,
    line_width: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    line_dash: Vec<f64>,
    font_size: f64,
    textures: HashMap<Uuid, TextureHandle>,
}

impl std::fmt::Debug for EguiSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EguiSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("shapes", &self.shapes.len())
            .field("textures", &self.textures.len())
            .finish()
    }
}

impl EguiSurface {
    pub fn new(ctx: Context, width: f64, height: f64) -> Self {
        Self {
            ctx,
            width,
            height,
            shapes: Vec::new(),
            subpaths: Vec::new(),
            stroke_color: Color32::BLACK,
            fill_color: Color32::BLACK,
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            line_dash: Vec::new(),
            font_size: 10.0,
            textures: HashMap::new(),
        }
    }

    /// Shapes drawn since the last full clear, in canvas pixel space
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Paint the display list into `display_rect`, scaled to fit its width
    pub fn present(&self, painter: &Painter, display_rect: Rect) {
        if self.width <= 0.0 {
            return;
        }
        let scale = display_rect.width() / self.width as f32;
        let transform = TSTransform::new(display_rect.min.to_vec2(), scale);
        let painter = painter.with_clip_rect(display_rect);

        trace!("Presenting {} shapes at scale {}", self.shapes.len(), scale);
        for shape in &self.shapes {
            let mut shape = shape.clone();
            shape.transform(transform);
            painter.add(shape);
        }
    }

    fn stroke(&self) -> Stroke {
        Stroke::new(self.line_width, self.stroke_color)
    }

    fn current_point(&self) -> Option<Pos2> {
        self.subpaths.last().and_then(|path| path.last().copied())
    }

    fn push_point(&mut self, point: Pos2) {
        match self.subpaths.last_mut() {
            Some(path) => path.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    /// Emit a polyline with the current stroke, dash and cap settings
    fn stroke_polyline(&mut self, points: Vec<Pos2>) {
        if points.len() < 2 {
            return;
        }
        let stroke = Self::stroke(self);

        if let [dash, rest @ ..] = self.line_dash.as_slice() {
            let gap = rest.first().copied().unwrap_or(*dash);
            self.shapes
                .extend(Shape::dashed_line(&points, stroke, *dash as f32, gap as f32));
        } else {
            if self.line_cap == LineCap::Round {
                let radius = self.line_width / 2.0;
                for end in [points[0], points[points.len() - 1]] {
                    self.shapes
                        .push(Shape::circle_filled(end, radius, self.stroke_color));
                }
            }
            if self.line_join == LineJoin::Round && points.len() > 2 {
                let radius = self.line_width / 2.0;
                for joint in &points[1..points.len() - 1] {
                    self.shapes
                        .push(Shape::circle_filled(*joint, radius, self.stroke_color));
                }
            }
            self.shapes.push(Shape::line(points, stroke));
        }
    }

    fn texture_for(&mut self, image: &BackgroundImage) -> egui::TextureId {
        let id = image.id();
        self.textures.retain(|cached, _| *cached == id);

        let ctx = &self.ctx;
        self.textures
            .entry(id)
            .or_insert_with(|| {
                let size = [image.width() as usize, image.height() as usize];
                let pixels = ColorImage::from_rgba_unmultiplied(size, image.rgba());
                ctx.load_texture(format!("background_{id}"), pixels, TextureOptions::LINEAR)
            })
            .id()
    }

    fn font_id(&self) -> FontId {
        FontId::proportional(self.font_size as f32)
    }
}

impl Surface for EguiSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.shapes.clear();
    }

    /// Only clears covering the whole surface are supported; they reset the
    /// display list.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height {
            self.shapes.clear();
        } else {
            trace!("Ignoring partial clear ({x}, {y}, {width}, {height})");
        }
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(vec![pos(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_point(pos(x, y));
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        let end = pos(x, y);
        let Some(start) = self.current_point() else {
            self.push_point(end);
            return;
        };
        let control = pos(cpx, cpy);
        for i in 1..=CURVE_SEGMENTS {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let mt = 1.0 - t;
            let point = start.to_vec2() * (mt * mt)
                + control.to_vec2() * (2.0 * mt * t)
                + end.to_vec2() * (t * t);
            self.push_point(point.to_pos2());
        }
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start_angle: f64, end_angle: f64) {
        let sweep = end_angle - start_angle;
        let steps = ((sweep.abs() / std::f64::consts::TAU) * ELLIPSE_SEGMENTS as f64)
            .ceil()
            .max(1.0) as usize;
        for i in 0..=steps {
            let angle = start_angle + sweep * i as f64 / steps as f64;
            self.push_point(pos(cx + rx * angle.cos(), cy + ry * angle.sin()));
        }
    }

    fn stroke(&mut self) {
        let subpaths = self.subpaths.clone();
        for path in subpaths {
            self.stroke_polyline(path);
        }
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let corners = vec![
            pos(x, y),
            pos(x + width, y),
            pos(x + width, y + height),
            pos(x, y + height),
            pos(x, y),
        ];
        self.stroke_polyline(corners);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.stroke_color = parse_color(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.fill_color = parse_color(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width as f32;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.line_join = join;
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.line_dash = segments.to_vec();
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn measure_text(&mut self, text: &str) -> TextMetrics {
        let font_id = self.font_id();
        let size = self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), font_id, self.fill_color)
                .size()
        });
        let height = f64::from(size.y);
        let ascent = self.font_size.min(height);
        TextMetrics {
            width: f64::from(size.x),
            ascent,
            descent: height - ascent,
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let font_id = self.font_id();
        let color = self.fill_color;
        let galley = self
            .ctx
            .fonts(|fonts| fonts.layout_no_wrap(text.to_owned(), font_id, color));
        self.shapes.push(Shape::galley(pos(x, y), galley, color));
    }

    fn draw_image(&mut self, image: &BackgroundImage, x: f64, y: f64, width: f64, height: f64) {
        let texture = self.texture_for(image);
        let rect = Rect::from_min_size(pos(x, y), egui::vec2(width as f32, height as f32));
        let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
        self.shapes.push(Shape::image(texture, rect, uv, Color32::WHITE));
    }
}

fn pos(x: f64, y: f64) -> Pos2 {
    egui::pos2(x as f32, y as f32)
}

/// Parse a `#rgb` / `#rrggbb` / `#rrggbbaa` color, falling back to white
pub fn parse_color(color: &str) -> Color32 {
    Color32::from_hex(color).unwrap_or_else(|_| {
        warn!("Unsupported color {color:?}, using white");
        Color32::WHITE
    })
}

/// The egui cursor shown for a board cursor style
pub fn cursor_icon(style: CursorStyle) -> CursorIcon {
    match style {
        CursorStyle::Move => CursorIcon::Move,
        CursorStyle::Default => CursorIcon::Default,
        CursorStyle::NsResize => CursorIcon::ResizeVertical,
        CursorStyle::EwResize => CursorIcon::ResizeHorizontal,
        CursorStyle::NwseResize => CursorIcon::ResizeNwSe,
        CursorStyle::NeswResize => CursorIcon::ResizeNeSw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> EguiSurface {
        EguiSurface::new(Context::default(), 200.0, 100.0)
    }

    #[test]
    fn test_stroke_builds_line_shapes() {
        let mut surface = surface();
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.line_to(50.0, 50.0);
        surface.quadratic_curve_to(60.0, 60.0, 70.0, 50.0);
        Surface::stroke(&mut surface);

        assert_eq!(surface.shapes().len(), 1);
        match &surface.shapes()[0] {
            Shape::Path(path) => {
                assert_eq!(path.points.len(), 2 + CURVE_SEGMENTS);
                assert_eq!(path.points.last(), Some(&egui::pos2(70.0, 50.0)));
            }
            other => panic!("expected a path, got {other:?}"),
        }
    }

    #[test]
    fn test_dashed_rect_and_full_clear() {
        let mut surface = surface();
        surface.set_line_dash(&[20.0, 50.0]);
        surface.stroke_rect(10.0, 10.0, 180.0, 80.0);
        assert!(surface.shapes().len() > 1);

        surface.clear_rect(0.0, 0.0, 200.0, 100.0);
        assert!(surface.shapes().is_empty());
    }

    #[test]
    fn test_partial_clear_keeps_shapes() {
        let mut surface = surface();
        surface.stroke_rect(10.0, 10.0, 20.0, 20.0);
        surface.clear_rect(0.0, 0.0, 50.0, 50.0);
        assert_eq!(surface.shapes().len(), 1);
    }

    #[test]
    fn test_set_size() {
        let mut surface = surface();
        surface.set_size(640.0, 480.0);
        assert_eq!((surface.width(), surface.height()), (640.0, 480.0));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ffffff"), Color32::WHITE);
        assert_eq!(parse_color("#000000"), Color32::BLACK);
        assert_eq!(parse_color("not a color"), Color32::WHITE);
    }

    #[test]
    fn test_cursor_icons() {
        assert_eq!(cursor_icon(CursorStyle::Move), CursorIcon::Move);
        assert_eq!(cursor_icon(CursorStyle::NwseResize), CursorIcon::ResizeNwSe);
        assert_eq!(cursor_icon(CursorStyle::NsResize), CursorIcon::ResizeVertical);
    }
}
