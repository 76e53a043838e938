use glam::{Mat4, Vec2};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Zoom is the half-extent of the visible coordinate window and stays
/// inside this range no matter how far the wheel is spun.
pub const MIN_ZOOM: f32 = 0.001;
pub const MAX_ZOOM: f32 = 1000.0;

/// One wheel notch scales zoom by this base (negative offsets zoom in).
pub const ZOOM_STEP_BASE: f32 = 1.5;

/// Cursor pixels to world units: a drag moves the center by
/// `delta * zoom / DRAG_DIVISOR`.
const DRAG_DIVISOR: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Half-extent of the visible window, in `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f32,
    /// World coordinate at the middle of the window.
    pub center: Vec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            center: Vec2::ZERO,
        }
    }
}

impl ViewState {
    /// Orthographic projection of the rectangle
    /// `[center - zoom, center + zoom]` on both axes onto NDC.
    ///
    /// Pure function of the state; the renderer rebuilds the `Transform`
    /// uniform from it every frame.
    pub fn view_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.center.x - self.zoom,
            self.center.x + self.zoom,
            self.center.y - self.zoom,
            self.center.y + self.zoom,
            -1.0,
            1.0,
        )
    }
}

/// Translates pointer events into view mutations.
///
/// `pointer_down` is the drag state machine: false = idle, true = dragging.
/// Only the primary (left) button toggles it; other buttons are ignored.
pub struct ViewController {
    pointer_down: bool,
    last_pointer: Option<(f64, f64)>,
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            pointer_down: false,
            last_pointer: None,
        }
    }

    /// Handles window events and updates the view.
    pub fn handle_event(&mut self, event: &WindowEvent, view: &mut ViewState) {
        match event {
            WindowEvent::MouseInput { button, state, .. } => {
                if *button == MouseButton::Left {
                    self.handle_button(*state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_pan((position.x, position.y), view);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };

                self.handle_scroll(scroll, view);
            }
            _ => {}
        }
    }

    /// Primary-button press starts a drag; release ends it.
    pub fn handle_button(&mut self, pressed: bool) {
        self.pointer_down = pressed;
    }

    /// Scales zoom by `ZOOM_STEP_BASE^(-yoffset)` and clamps.
    pub fn handle_scroll(&mut self, yoffset: f32, view: &mut ViewState) {
        // Positive offset = scroll up = zoom in = shrink the window.
        view.zoom = (view.zoom * ZOOM_STEP_BASE.powf(-yoffset)).clamp(MIN_ZOOM, MAX_ZOOM);

        log::debug!("zoom: {} center: ({}, {})", view.zoom, view.center.x, view.center.y);
    }

    /// Pans the view while the primary button is held; otherwise only the
    /// previous-position baseline moves. The first move after startup seeds
    /// the baseline.
    pub fn handle_cursor_pan(&mut self, xy: (f64, f64), view: &mut ViewState) {
        if let Some(last) = self.last_pointer {
            if self.pointer_down {
                let dx = (xy.0 - last.0) as f32;
                let dy = (xy.1 - last.1) as f32;

                // Screen-space Y runs down, world Y runs up.
                view.center.x -= dx * view.zoom / DRAG_DIVISOR;
                view.center.y += dy * view.zoom / DRAG_DIVISOR;

                log::debug!(
                    "zoom: {} center: ({}, {})",
                    view.zoom,
                    view.center.x,
                    view.center.y
                );
            }
        }
        self.last_pointer = Some(xy);
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_unit_window_at_origin() {
        let view = ViewState::default();
        assert_eq!(view.zoom, 1.0);
        assert_eq!(view.center, Vec2::ZERO);
    }

    #[test]
    fn scroll_multiplies_zoom_exactly() {
        let mut ctl = ViewController::new();
        let mut view = ViewState::default();

        ctl.handle_scroll(-2.0, &mut view);
        assert_eq!(view.zoom, ZOOM_STEP_BASE.powf(2.0));

        ctl.handle_scroll(3.0, &mut view);
        assert_eq!(view.zoom, ZOOM_STEP_BASE.powf(2.0) * ZOOM_STEP_BASE.powf(-3.0));
    }

    #[test]
    fn zoom_clamps_at_both_ends() {
        let mut ctl = ViewController::new();

        let mut view = ViewState::default();
        ctl.handle_scroll(1_000.0, &mut view);
        assert_eq!(view.zoom, MIN_ZOOM);

        // Further zooming in stays pinned at the floor.
        ctl.handle_scroll(50.0, &mut view);
        assert_eq!(view.zoom, MIN_ZOOM);

        let mut view = ViewState::default();
        ctl.handle_scroll(-1_000.0, &mut view);
        assert_eq!(view.zoom, MAX_ZOOM);

        ctl.handle_scroll(-1.0, &mut view);
        assert_eq!(view.zoom, MAX_ZOOM);
    }

    #[test]
    fn drag_while_pressed_pans_scaled_by_zoom() {
        let mut ctl = ViewController::new();
        let mut view = ViewState {
            zoom: 2.0,
            center: Vec2::ZERO,
        };

        ctl.handle_cursor_pan((100.0, 100.0), &mut view); // seed baseline
        ctl.handle_button(true);
        ctl.handle_cursor_pan((130.0, 60.0), &mut view); // dx=30, dy=-40

        assert_eq!(view.center.x, -30.0 * 2.0 / 1000.0);
        assert_eq!(view.center.y, -40.0 * 2.0 / 1000.0);
    }

    #[test]
    fn move_while_released_does_not_pan() {
        let mut ctl = ViewController::new();
        let mut view = ViewState::default();

        ctl.handle_cursor_pan((10.0, 10.0), &mut view);
        ctl.handle_cursor_pan((500.0, -300.0), &mut view);

        assert_eq!(view.center, Vec2::ZERO);
    }

    #[test]
    fn idle_moves_update_the_drag_baseline() {
        let mut ctl = ViewController::new();
        let mut view = ViewState::default();

        // Wander while idle, then press and move a known delta. Only the
        // delta after the press may pan.
        ctl.handle_cursor_pan((0.0, 0.0), &mut view);
        ctl.handle_cursor_pan((400.0, 250.0), &mut view);
        ctl.handle_button(true);
        ctl.handle_cursor_pan((410.0, 250.0), &mut view); // dx=10, dy=0

        assert_eq!(view.center.x, -10.0 / 1000.0);
        assert_eq!(view.center.y, 0.0);
    }

    #[test]
    fn release_stops_the_drag() {
        let mut ctl = ViewController::new();
        let mut view = ViewState::default();

        ctl.handle_cursor_pan((0.0, 0.0), &mut view);
        ctl.handle_button(true);
        ctl.handle_cursor_pan((10.0, 0.0), &mut view);
        let panned = view.center;

        ctl.handle_button(false);
        ctl.handle_cursor_pan((900.0, 900.0), &mut view);
        assert_eq!(view.center, panned);
    }

    #[test]
    fn view_proj_matches_orthographic_bounds() {
        let view = ViewState {
            zoom: 3.5,
            center: Vec2::new(2.0, -1.0),
        };

        let expected = Mat4::orthographic_rh(
            2.0 - 3.5,
            2.0 + 3.5,
            -1.0 - 3.5,
            -1.0 + 3.5,
            -1.0,
            1.0,
        );

        assert_eq!(view.view_proj(), expected);
    }

    #[test]
    fn recompute_is_deterministic_in_state() {
        let view = ViewState {
            zoom: 0.25,
            center: Vec2::new(-4.0, 7.5),
        };

        assert_eq!(view.view_proj(), view.view_proj());
    }
}
