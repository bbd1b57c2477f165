use log::{debug, warn};

use crate::brush::CanvasBrush;
use crate::config::BoardConfig;
use crate::element::{factory, CursorStyle, OperationMode};
use crate::geometry::CanvasTransform;
use crate::state::{EditorState, ToolState};
use crate::surface::Surface;
use crate::util::time::Throttle;

use super::InputEvent;

/// Routes pointer events to a [`CanvasBrush`] according to the gesture state.
///
/// A press on a shape drags it; a press elsewhere draws with the active tool,
/// or does nothing when no tool is active. Hovering updates the cursor.
#[derive(Debug, Clone)]
pub struct PointerRouter {
    state: EditorState,
    tool: ToolState,
    transform: CanvasTransform,
    /// Canvas position of the previous pointer event of the current gesture
    last_point: (f64, f64),
    /// Mode of the shape being drawn, if any
    drawing_mode: Option<OperationMode>,
    line_throttle: Throttle,
    /// Latest freehand point held back by the throttle
    pending_point: Option<(f64, f64)>,
}

impl Default for PointerRouter {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}

impl PointerRouter {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            state: EditorState::Idle,
            tool: ToolState::from_config(config),
            transform: CanvasTransform::default(),
            last_point: (0.0, 0.0),
            drawing_mode: None,
            line_throttle: Throttle::new(config.line_throttle()),
            pending_point: None,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut ToolState {
        &mut self.tool
    }

    pub fn transform(&self) -> CanvasTransform {
        self.transform
    }

    /// Set where the canvas is displayed and at what scale
    pub fn set_transform(&mut self, transform: CanvasTransform) {
        self.transform = transform;
    }

    pub fn handle<S: Surface>(&mut self, event: InputEvent, brush: &mut CanvasBrush<S>) {
        let (client_x, client_y) = event.position();
        let (x, y) = self.transform.to_canvas(client_x, client_y);

        match event {
            InputEvent::PointerDown { .. } => self.pointer_down(x, y, brush),
            InputEvent::PointerMove { .. } => self.pointer_move(x, y, event.time(), brush),
            InputEvent::PointerUp { .. } => self.pointer_up(brush),
        }
    }

    fn pointer_down<S: Surface>(&mut self, x: f64, y: f64, brush: &mut CanvasBrush<S>) {
        if !self.state.is_idle() {
            warn!("Ignoring pointer down while {}", self.state.name());
            return;
        }

        self.last_point = (x, y);

        if brush.get_select_graph(x, y) {
            self.transition(EditorState::Dragging);
        } else if let Some(mode) = self.tool.operation_mode {
            let element = factory::create_element(
                mode,
                &self.tool.color,
                self.tool.line_width,
                x,
                y,
                Some(&self.tool.text),
            );
            if mode == OperationMode::Text {
                self.tool.operation_mode = None;
            }
            brush.start_draw(element);
            self.drawing_mode = Some(mode);
            self.line_throttle.reset();
            self.pending_point = None;
            self.transition(EditorState::Drawing);
        } else {
            self.transition(EditorState::Selecting);
        }
    }

    fn pointer_move<S: Surface>(&mut self, x: f64, y: f64, time: f64, brush: &mut CanvasBrush<S>) {
        match self.state {
            EditorState::Idle => {
                brush.on_pointer_over(x, y);
            }
            EditorState::Dragging => {
                let (last_x, last_y) = self.last_point;
                self.last_point = (x, y);
                brush.drag(x - last_x, y - last_y);
            }
            EditorState::Drawing => match self.drawing_mode {
                Some(OperationMode::Line) => {
                    if self.line_throttle.ready(time) {
                        self.pending_point = None;
                        brush.end_draw(x, y);
                    } else {
                        self.pending_point = Some((x, y));
                    }
                }
                // A label is placed where the press happened
                Some(OperationMode::Text) | None => {}
                Some(_) => brush.end_draw(x, y),
            },
            EditorState::Selecting => {}
        }
    }

    fn pointer_up<S: Surface>(&mut self, brush: &mut CanvasBrush<S>) {
        if let Some((x, y)) = self.pending_point.take() {
            brush.end_draw(x, y);
        }
        self.drawing_mode = None;
        self.transition(EditorState::Idle);
        brush.set_cursor(CursorStyle::Default);
    }

    fn transition(&mut self, new_state: EditorState) -> bool {
        if self.state.can_transition_to(new_state) {
            debug!("Editor state {} -> {}", self.state.name(), new_state.name());
            self.state = new_state;
            true
        } else {
            warn!(
                "Invalid state transition {} -> {}",
                self.state.name(),
                new_state.name()
            );
            false
        }
    }
}
