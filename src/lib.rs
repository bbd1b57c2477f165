#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod brush;
pub mod config;
pub mod element;
pub mod error;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod state;
pub mod surface;
pub mod util;

pub use app::BoardApp;
pub use background::BackgroundImage;
pub use brush::CanvasBrush;
pub use config::{BoardConfig, ConfigError};
pub use element::{factory, Element, ElementData, ElementType, OperationMode};
pub use error::{BrushError, BrushResult};
pub use input::{InputEvent, PointerRouter};
pub use renderer::EguiSurface;
pub use state::{EditorState, ToolState};
pub use surface::{RecordingSurface, Surface};
