use uuid::Uuid;

use super::common::{
    apply_anchors, draw_dotted_rect, ElementData, ElementStyle, ElementUpdate, HitResult,
    OperationMode, PositionType,
};
use super::Element;
use crate::surface::{Surface, TextMetrics};

/// Font size as a multiple of the line width
pub const TEXT_ZOOM_RATIO: f64 = 5.0;

/// Text label anchored at its top-left corner.
///
/// Its extent is only known once a surface has measured it, so the metrics
/// are cached on every paint. Until the first paint the label has no extent:
/// it cannot be hit and draws no selection box.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    id: Uuid,
    style: ElementStyle,
    pub begin_x: f64,
    pub begin_y: f64,
    text: String,
    metrics: Option<TextMetrics>,
}

impl Text {
    pub fn new(
        color: impl Into<String>,
        line_width: f64,
        begin_x: f64,
        begin_y: f64,
        text: impl Into<String>,
    ) -> Self {
        Self::from_parts(ElementStyle::new(color, line_width), (begin_x, begin_y), text.into())
    }

    pub(crate) fn from_parts(style: ElementStyle, begin: (f64, f64), text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            style,
            begin_x: begin.0,
            begin_y: begin.1,
            text,
            metrics: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f64 {
        self.style.line_width * TEXT_ZOOM_RATIO
    }

    /// Metrics measured during the most recent paint
    pub fn metrics(&self) -> Option<TextMetrics> {
        self.metrics
    }
}

impl Element for Text {
    fn id(&self) -> Uuid {
        self.id
    }

    fn operation_mode(&self) -> OperationMode {
        OperationMode::Text
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.set_font_size(self.font_size());
        surface.set_fill_style(&self.style.color);

        self.metrics = Some(surface.measure_text(&self.text));
        surface.fill_text(&self.text, self.begin_x, self.begin_y);

        if self.style.is_selected {
            self.selected(surface);
        }
    }

    fn is_inside(&self, x: f64, y: f64) -> Option<HitResult> {
        let metrics = self.metrics?;

        let inside = x >= self.begin_x
            && x <= self.begin_x + metrics.width
            && y >= self.begin_y
            && y <= self.begin_y + metrics.height();
        inside.then(HitResult::content)
    }

    fn selected(&self, surface: &mut dyn Surface) {
        let Some(metrics) = self.metrics else {
            return;
        };
        if !self.style.is_selected {
            return;
        }
        draw_dotted_rect(surface, self.begin_x, self.begin_y, metrics.width, metrics.height());
    }

    fn update(&mut self, update: &ElementUpdate) {
        self.style.apply(update);
        apply_anchors(update, &mut self.begin_x, &mut self.begin_y, None);
        if let Some(text) = &update.text {
            self.text.clone_from(text);
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.begin_x += dx;
        self.begin_y += dy;
    }

    fn resize(&mut self, _position: PositionType, _dx: f64, _dy: f64) {
        // Text size follows the line width, not the pointer
    }

    fn to_data(&self) -> ElementData {
        let mut data = ElementData::new(&self.style, OperationMode::Text);
        data.begin_x = Some(self.begin_x);
        data.begin_y = Some(self.begin_y);
        data.text = Some(self.text.clone());
        data
    }
}
