#![warn(clippy::all, rust_2018_idioms)]
// hide console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use canvas_board::{BoardApp, BoardConfig};

/// Environment variable naming an optional JSON config file
const CONFIG_ENV: &str = "CANVAS_BOARD_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => BoardConfig::load(&path).unwrap_or_else(|err| {
            log::error!("Ignoring config {}: {err}", path.to_string_lossy());
            BoardConfig::default()
        }),
        None => BoardConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Canvas Board")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Canvas Board",
        options,
        Box::new(|cc| Ok(Box::new(BoardApp::new(cc, config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
