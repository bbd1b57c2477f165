use egui::{Color32, Key, Modifiers, Sense, Stroke};
use log::{error, info};

use crate::background::BackgroundImage;
use crate::brush::CanvasBrush;
use crate::config::BoardConfig;
use crate::element::{OperationMode, StyleUpdate};
use crate::error::BrushResult;
use crate::geometry::{fit_canvas_size, CanvasTransform};
use crate::input::{InputHandler, PointerRouter};
use crate::renderer::{cursor_icon, parse_color, EguiSurface};
use crate::surface::Surface;

/// Canvas size used until a background image is loaded
const BLANK_CANVAS_SIZE: (f64, f64) = (1280.0, 720.0);

const SHAPE_TOOLS: [(OperationMode, &str); 4] = [
    (OperationMode::Line, "✏ Line"),
    (OperationMode::Rect, "◻ Rectangle"),
    (OperationMode::Ellipse, "◯ Ellipse"),
    (OperationMode::Arrow, "➚ Arrow"),
];

pub struct BoardApp {
    config: BoardConfig,
    brush: CanvasBrush<EguiSurface>,
    router: PointerRouter,
    input: InputHandler,
    /// Contents of the text field next to the text tool
    text_input: String,
    /// Last error or notice shown under the tool panel
    status: Option<String>,
    /// JSON of the last export, shown until dismissed
    export: Option<String>,
}

impl BoardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: BoardConfig) -> Self {
        let (width, height) = BLANK_CANVAS_SIZE;
        let surface = EguiSurface::new(cc.egui_ctx.clone(), width, height);

        Self {
            router: PointerRouter::new(&config),
            brush: CanvasBrush::with_surface(surface),
            input: InputHandler::new(),
            text_input: String::new(),
            status: None,
            export: None,
            config,
        }
    }

    fn report(&mut self, result: BrushResult<()>) {
        match result {
            Ok(()) => self.status = None,
            Err(err) => {
                info!("{err}");
                self.status = Some(err.to_string());
            }
        }
    }

    fn load_background(&mut self, bytes: &[u8]) {
        match BackgroundImage::decode(bytes) {
            Ok(image) => {
                self.brush.clear();
                self.brush.set_background_image(image);
                self.status = None;
            }
            Err(err) => {
                error!("Failed to load background: {err}");
                self.status = Some(err.to_string());
            }
        }
    }

    fn export(&mut self) {
        match self.brush.to_json() {
            Ok(json) => {
                info!("Exported board: {json}");
                self.export = Some(json);
            }
            Err(err) => self.report(Err(err)),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        // Only the last image matters; it replaces the board anyway
        let Some(file) = dropped.into_iter().last() else {
            return;
        };

        if let Some(bytes) = &file.bytes {
            self.load_background(bytes);
            return;
        }

        match read_dropped_path(&file) {
            Some(Ok(bytes)) => self.load_background(&bytes),
            Some(Err(err)) => {
                error!("Failed to read dropped file: {err}");
                self.status = Some(err.to_string());
            }
            None => {}
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Leave keys alone while the text field is being edited
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        let (redo, undo, delete) = ctx.input_mut(|i| {
            let redo = i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y);
            let undo = i.consume_key(Modifiers::COMMAND, Key::Z);
            let delete = i.consume_key(Modifiers::NONE, Key::Delete)
                || i.consume_key(Modifiers::NONE, Key::Backspace);
            (redo, undo, delete)
        });

        if redo {
            let result = self.brush.forward();
            self.report(result);
        }
        if undo {
            let result = self.brush.rollback();
            self.report(result);
        }
        if delete {
            let result = self.brush.delete_select_graph();
            self.report(result);
        }
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");
        ui.separator();

        let active = self.router.tool().operation_mode;
        ui.horizontal_wrapped(|ui| {
            for (mode, label) in SHAPE_TOOLS {
                if ui.selectable_label(active == Some(mode), label).clicked() {
                    // Clicking the active tool switches back to select-only
                    self.router.tool_mut().operation_mode =
                        if active == Some(mode) { None } else { Some(mode) };
                }
            }
        });

        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.text_input);
            let text_active = active == Some(OperationMode::Text);
            let can_place = text_active || !self.text_input.trim().is_empty();
            if ui
                .add_enabled(can_place, egui::SelectableLabel::new(text_active, "🗛 Text"))
                .clicked()
            {
                if text_active {
                    self.router.tool_mut().operation_mode = None;
                } else {
                    let text = self.text_input.trim().to_owned();
                    self.router.tool_mut().place_text(text);
                }
            }
        });

        ui.separator();
        ui.label("Color");
        ui.horizontal_wrapped(|ui| {
            for color in self.config.palette.clone() {
                let selected = self.router.tool().color == color;
                let swatch = egui::Button::new("")
                    .fill(parse_color(&color))
                    .min_size(egui::vec2(24.0, 24.0))
                    .stroke(if selected {
                        Stroke::new(2.0, Color32::LIGHT_BLUE)
                    } else {
                        Stroke::new(1.0, Color32::DARK_GRAY)
                    });
                if ui.add(swatch).on_hover_text(color.as_str()).clicked() {
                    self.router.tool_mut().color.clone_from(&color);
                    self.brush.change_select_graph(StyleUpdate {
                        color: Some(color),
                        line_width: None,
                    });
                }
            }
        });

        ui.label("Line width");
        ui.horizontal(|ui| {
            for width in self.config.line_widths.clone() {
                let selected = self.router.tool().line_width == width;
                if ui.selectable_label(selected, format!("{width}")).clicked() {
                    self.router.tool_mut().line_width = width;
                    self.brush.change_select_graph(StyleUpdate {
                        color: None,
                        line_width: Some(width),
                    });
                }
            }
        });

        ui.separator();
        ui.horizontal_wrapped(|ui| {
            if ui.button("⟲ Undo").clicked() {
                let result = self.brush.rollback();
                self.report(result);
            }
            if ui.button("⟳ Redo").clicked() {
                let result = self.brush.forward();
                self.report(result);
            }
            if ui.button("🗑 Delete").clicked() {
                let result = self.brush.delete_select_graph();
                self.report(result);
            }
            if ui.button("Clear").clicked() {
                self.brush.clear();
                self.status = None;
            }
            if ui.button("Export JSON").clicked() {
                self.export();
            }
        });

        ui.separator();
        ui.weak("Drop an image onto the window to annotate it.");
        if let Some(status) = &self.status {
            ui.colored_label(Color32::LIGHT_RED, status.as_str());
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (width, height) = self
            .brush
            .surface()
            .map_or(BLANK_CANVAS_SIZE, |surface| (surface.width(), surface.height()));
        let available = ui.available_size();
        let (display_width, display_height, scale) = fit_canvas_size(
            width,
            height,
            f64::from(available.x),
            f64::from(available.y),
        );

        let (response, painter) = ui.allocate_painter(
            egui::vec2(display_width as f32, display_height as f32),
            Sense::click_and_drag(),
        );
        let rect = response.rect;
        self.router.set_transform(CanvasTransform::new(
            f64::from(rect.left()),
            f64::from(rect.top()),
            scale,
        ));

        for event in self.input.process_input(ui.ctx(), rect) {
            self.router.handle(event, &mut self.brush);
        }

        if response.hovered() || response.dragged() {
            ui.ctx().set_cursor_icon(cursor_icon(self.brush.cursor()));
        }

        painter.rect_filled(rect, 0.0, Color32::from_gray(40));
        if let Some(surface) = self.brush.surface() {
            surface.present(&painter, rect);
        }
    }

    fn export_window(&mut self, ctx: &egui::Context) {
        let Some(json) = &self.export else {
            return;
        };
        let mut open = true;
        egui::Window::new("Exported shapes")
            .open(&mut open)
            .default_width(420.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add(egui::Label::new(egui::RichText::new(json).monospace()).wrap());
                });
                if ui.button("Copy").clicked() {
                    ui.ctx().copy_text(json.clone());
                }
            });
        if !open {
            self.export = None;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_dropped_path(file: &egui::DroppedFile) -> Option<std::io::Result<Vec<u8>>> {
    file.path.as_ref().map(std::fs::read)
}

#[cfg(target_arch = "wasm32")]
fn read_dropped_path(_file: &egui::DroppedFile) -> Option<std::io::Result<Vec<u8>>> {
    None
}

impl eframe::App for BoardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);

        egui::SidePanel::left("tools_panel")
            .resizable(false)
            .show(ctx, |ui| self.tools_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));

        self.export_window(ctx);
    }
}
