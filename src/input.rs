//! Input handling for the visualization window.
//!
//! Raw winit events are folded into the small set of gestures the router
//! cares about: pointer position in NDC, a synthesized double-click, the
//! mode-toggle key, and an accumulated scroll fraction.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Two left presses within this window count as a double-click.
const DOUBLE_CLICK_SECS: f32 = 0.35;
/// Scroll-fraction change per wheel line.
const SCROLL_STEP: f32 = 0.05;

/// Synthesizes double-clicks from single press timestamps.
#[derive(Debug, Default)]
pub struct DoubleClick {
    last_press: Option<f32>,
}

impl DoubleClick {
    /// Register a press at `now`; returns true when it completes a pair.
    pub fn press(&mut self, now: f32) -> bool {
        let double = self
            .last_press
            .map(|t| now - t <= DOUBLE_CLICK_SECS)
            .unwrap_or(false);
        // A completed pair resets the chain so a triple-click does not
        // fire twice.
        self.last_press = if double { None } else { Some(now) };
        double
    }
}

/// Per-frame input state folded from window events.
#[derive(Debug, Default)]
pub struct Input {
    cursor_ndc: Option<Vec2>,
    double_click: DoubleClick,
    double_clicked: bool,
    toggle_pressed: bool,
    space_held: bool,
    scroll_fraction: f32,
    window_size: (u32, u32),
}

impl Input {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width, height),
            ..Default::default()
        }
    }

    /// Pointer position in normalized device coordinates, if the cursor
    /// is inside the window.
    pub fn cursor_ndc(&self) -> Option<Vec2> {
        self.cursor_ndc
    }

    /// Whether a double-click completed this frame.
    pub fn double_clicked(&self) -> bool {
        self.double_clicked
    }

    /// Whether the mode-toggle key went down this frame.
    pub fn toggle_pressed(&self) -> bool {
        self.toggle_pressed
    }

    /// Accumulated scroll position, normalized to `[0, 1]`.
    pub fn scroll_fraction(&self) -> f32 {
        self.scroll_fraction
    }

    /// Clear one-shot flags at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.double_clicked = false;
        self.toggle_pressed = false;
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Fold a winit window event into the gesture state. `now` is the
    /// frame clock, used for double-click timing.
    pub fn handle_event(&mut self, event: &WindowEvent, now: f32) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (w, h) = self.window_size;
                if w > 0 && h > 0 {
                    self.cursor_ndc = Some(Vec2::new(
                        (position.x as f32 / w as f32) * 2.0 - 1.0,
                        1.0 - (position.y as f32 / h as f32) * 2.0,
                    ));
                }
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor_ndc = None;
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if self.double_click.press(now) {
                    self.double_clicked = true;
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.apply_scroll_lines(lines);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(KeyCode::Space) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            // Ignore key repeat while held.
                            if !self.space_held {
                                self.toggle_pressed = true;
                            }
                            self.space_held = true;
                        }
                        ElementState::Released => {
                            self.space_held = false;
                        }
                    }
                }
            }

            _ => {}
        }
    }

    /// Fold wheel lines into the scroll fraction. Wheel-up scrolls back
    /// toward the top of the range.
    fn apply_scroll_lines(&mut self, lines: f32) {
        self.scroll_fraction = (self.scroll_fraction - lines * SCROLL_STEP).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_click_window() {
        let mut dc = DoubleClick::default();
        assert!(!dc.press(0.0));
        assert!(dc.press(0.2));
        // Chain resets after firing.
        assert!(!dc.press(0.3));

        assert!(!dc.press(2.0));
        // Too slow.
        assert!(!dc.press(2.5));
        assert!(dc.press(2.7));
    }

    #[test]
    fn test_scroll_fraction_clamped() {
        let mut input = Input::new(800, 600);
        for _ in 0..50 {
            input.apply_scroll_lines(-1.0);
        }
        assert_eq!(input.scroll_fraction(), 1.0);
        for _ in 0..100 {
            input.apply_scroll_lines(1.0);
        }
        assert_eq!(input.scroll_fraction(), 0.0);
    }

    #[test]
    fn test_one_shot_flags_clear_on_begin_frame() {
        let mut input = Input::new(800, 600);
        input.double_clicked = true;
        input.toggle_pressed = true;
        input.begin_frame();
        assert!(!input.double_clicked());
        assert!(!input.toggle_pressed());
    }
}
