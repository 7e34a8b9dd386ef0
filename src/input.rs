use egui::{Context, PointerButton, Pos2, Rect};

/// Pointer signals the drawing engine understands, in canvas-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed on the canvas
    Down(Pos2),
    /// Pointer moved while the stroke is held
    Move(Pos2),
    /// Primary button released
    Up,
}

/// Primary-button pointer state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub position: Option<Pos2>,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

impl PointerSample {
    /// Read the primary button state from egui's input
    pub fn from_context(ctx: &Context) -> Self {
        ctx.input(|input| Self {
            position: input.pointer.interact_pos(),
            pressed: input.pointer.button_pressed(PointerButton::Primary),
            down: input.pointer.button_down(PointerButton::Primary),
            released: input.pointer.button_released(PointerButton::Primary),
        })
    }
}

/// Converts raw egui pointer input into [`PointerEvent`]s for the canvas
#[derive(Debug, Clone)]
pub struct PointerTracker {
    canvas_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    /// A press started on the canvas and has not been released yet
    tracking: bool,
}

impl PointerTracker {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pointer_pos: None,
            tracking: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process this frame's egui input
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        self.process_sample(PointerSample::from_context(ctx))
    }

    /// Turn one frame of pointer state into engine events.
    ///
    /// Presses outside the canvas are ignored, moves that do not change the
    /// position are dropped, and a release anywhere ends the stroke.
    pub fn process_sample(&mut self, sample: PointerSample) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        if sample.pressed {
            if let Some(pos) = sample.position {
                if self.canvas_rect.contains(pos) {
                    self.tracking = true;
                    self.last_pointer_pos = Some(pos);
                    events.push(PointerEvent::Down(self.to_canvas(pos)));
                }
            }
        }

        if self.tracking && sample.down && !sample.pressed {
            if let Some(pos) = sample.position {
                if Some(pos) != self.last_pointer_pos {
                    self.last_pointer_pos = Some(pos);
                    events.push(PointerEvent::Move(self.to_canvas(pos)));
                }
            }
        }

        if self.tracking && sample.released {
            self.tracking = false;
            self.last_pointer_pos = None;
            events.push(PointerEvent::Up);
        }

        events
    }
}
