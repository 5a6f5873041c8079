//! Pointer and wheel input translated into view-state deltas.
//!
//! [`InputController`] accumulates winit mouse events and feeds scale and
//! rotation deltas into the scene's [`ViewState`] through its clamped
//! setters - out-of-range deltas are rejected there, not here. Events
//! arrive asynchronously from the host but only ever mutate ViewState, so
//! the render loop reading it at tick start sees ordinary last-write-wins
//! values.

use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use orrery_scene::ViewState;

/// Drag rotation: radians of view rotation per logical pixel.
pub const ROTATION_PER_PIXEL: f32 = 0.01;
/// Zoom: scale delta per scroll line.
pub const SCALE_PER_LINE: f32 = 0.25;
/// Pixel-delta wheels report roughly this many pixels per line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Translates pointer/wheel events into ViewState mutations.
#[derive(Debug, Default)]
pub struct InputController {
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl InputController {
    /// Create a controller with no drag in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is currently active.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Process a mouse button event; the left button starts and ends drags.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => self.dragging = true,
            ElementState::Released => {
                self.dragging = false;
                self.last_cursor = None;
            }
        }
    }

    /// Process a cursor move; while dragging, the motion becomes rotation.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64, view: &mut ViewState) {
        if self.dragging {
            if let Some((last_x, last_y)) = self.last_cursor {
                let dx = (x - last_x) as f32 * ROTATION_PER_PIXEL;
                let dy = (y - last_y) as f32 * ROTATION_PER_PIXEL;
                view.apply_rotation_delta(dx, dy);
            }
            self.last_cursor = Some((x, y));
        } else {
            self.last_cursor = None;
        }
    }

    /// Process a wheel event; scroll up zooms in.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta, view: &mut ViewState) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_x, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
        view.apply_scale_delta(lines * SCALE_PER_LINE);
    }

    /// The cursor left the window: end any drag in progress.
    pub fn on_cursor_left(&mut self) {
        if self.dragging {
            log::trace!("drag ended by cursor leaving the window");
        }
        self.dragging = false;
        self.last_cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_drag_rotates_view() {
        let mut input = InputController::new();
        let mut view = ViewState::new();

        input.on_button(MouseButton::Left, ElementState::Pressed);
        input.on_cursor_moved(100.0, 100.0, &mut view);
        input.on_cursor_moved(110.0, 95.0, &mut view);

        assert!((view.rotation_x() - 0.1).abs() < 1e-6);
        assert!((view.rotation_y() - (-0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_motion_without_drag_is_ignored() {
        let mut input = InputController::new();
        let mut view = ViewState::new();

        input.on_cursor_moved(100.0, 100.0, &mut view);
        input.on_cursor_moved(200.0, 200.0, &mut view);
        assert_eq!(view.rotation_x(), 0.0);
        assert_eq!(view.rotation_y(), 0.0);
    }

    #[test]
    fn test_first_sample_after_press_sets_anchor_only() {
        let mut input = InputController::new();
        let mut view = ViewState::new();

        input.on_button(MouseButton::Left, ElementState::Pressed);
        // No previous sample yet: nothing to diff against.
        input.on_cursor_moved(500.0, 500.0, &mut view);
        assert_eq!(view.rotation_x(), 0.0);
    }

    #[test]
    fn test_release_ends_drag_and_clears_anchor() {
        let mut input = InputController::new();
        let mut view = ViewState::new();

        input.on_button(MouseButton::Left, ElementState::Pressed);
        input.on_cursor_moved(0.0, 0.0, &mut view);
        input.on_button(MouseButton::Left, ElementState::Released);
        assert!(!input.is_dragging());

        // A new drag does not diff against the stale anchor.
        input.on_button(MouseButton::Left, ElementState::Pressed);
        input.on_cursor_moved(300.0, 300.0, &mut view);
        assert_eq!(view.rotation_x(), 0.0);
    }

    #[test]
    fn test_other_buttons_do_not_drag() {
        let mut input = InputController::new();
        input.on_button(MouseButton::Right, ElementState::Pressed);
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_line_scroll_zooms() {
        let mut input = InputController::new();
        let mut view = ViewState::new();
        input.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0), &mut view);
        assert_eq!(view.scale(), 1.5);
        input.on_scroll(MouseScrollDelta::LineDelta(0.0, -1.0), &mut view);
        assert_eq!(view.scale(), 1.25);
    }

    #[test]
    fn test_pixel_scroll_normalized_to_lines() {
        let mut input = InputController::new();
        let mut view = ViewState::new();
        input.on_scroll(
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0)),
            &mut view,
        );
        assert_eq!(view.scale(), 1.5);
    }

    #[test]
    fn test_overscroll_is_rejected_by_view_state() {
        let mut input = InputController::new();
        let mut view = ViewState::new();
        // 100 lines would land far past the scale ceiling: rejected whole.
        input.on_scroll(MouseScrollDelta::LineDelta(0.0, 100.0), &mut view);
        assert_eq!(view.scale(), 1.0);
    }

    #[test]
    fn test_cursor_leaving_window_ends_drag() {
        let mut input = InputController::new();
        input.on_button(MouseButton::Left, ElementState::Pressed);
        input.on_cursor_left();
        assert!(!input.is_dragging());
    }
}
