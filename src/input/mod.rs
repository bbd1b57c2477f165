use egui::{Context, PointerButton, Pos2, Rect};

mod router;
pub use router::PointerRouter;

/// Primary-button pointer events, in device (screen) coordinates.
///
/// `time` is in seconds and only needs to be monotonic within one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, time: f64 },
    PointerMove { x: f64, y: f64, time: f64 },
    PointerUp { x: f64, y: f64, time: f64 },
}

impl InputEvent {
    pub fn position(&self) -> (f64, f64) {
        match *self {
            InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerMove { x, y, .. }
            | InputEvent::PointerUp { x, y, .. } => (x, y),
        }
    }

    pub fn time(&self) -> f64 {
        match *self {
            InputEvent::PointerDown { time, .. }
            | InputEvent::PointerMove { time, .. }
            | InputEvent::PointerUp { time, .. } => time,
        }
    }
}

/// Turns raw egui pointer input over the canvas into [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// A press started on the canvas and has not been released yet
    pressed: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's events. Presses only count inside `canvas_rect`;
    /// moves and the release of a gesture that began there are reported
    /// wherever the pointer is.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let time = input.time;
            let event_at = |pos: Pos2| (f64::from(pos.x), f64::from(pos.y));

            if let Some(pos) = input.pointer.hover_pos() {
                let on_canvas = self.pressed || canvas_rect.contains(pos);
                if Some(pos) != self.last_pointer_pos && on_canvas {
                    let (x, y) = event_at(pos);
                    events.push(InputEvent::PointerMove { x, y, time });
                }
                self.last_pointer_pos = Some(pos);
            }

            let pos = input.pointer.interact_pos().or(self.last_pointer_pos);

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = pos.filter(|pos| canvas_rect.contains(*pos)) {
                    let (x, y) = event_at(pos);
                    events.push(InputEvent::PointerDown { x, y, time });
                    self.pressed = true;
                }
            }

            if input.pointer.button_released(PointerButton::Primary) && self.pressed {
                let (x, y) = pos.map(event_at).unwrap_or_default();
                events.push(InputEvent::PointerUp { x, y, time });
                self.pressed = false;
            }
        });

        events
    }
}
