use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::core::camera::MouseButtons;
use crate::core::keyboard::{Key, KeyState};

/// Pixels per wheel tick when the platform reports pixel deltas
const WHEEL_PIXELS_PER_TICK: f32 = 120.0;

/// Bridges winit window events to the input state the camera consumes.
///
/// Owned by the application; there is no global input state. Auto-repeat
/// keyboard events are dropped here so they never reach `KeyState`.
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    keys: KeyState,
    buttons: MouseButtons,
    cursor: Option<Vec2>,
    cursor_delta: Vec2,
    wheel_ticks: f32,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event and update internal state.
    /// Returns true when the event changed the mouse button bitmask, which is
    /// when the caller must recompute the mouse mode.
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return false;
                }
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(key) = Self::keycode_to_key(keycode) {
                        match event.state {
                            ElementState::Pressed => self.keys.set_down(key),
                            ElementState::Released => self.keys.set_up(key),
                        }
                    }
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.buttons.left = pressed,
                    MouseButton::Right => self.buttons.right = pressed,
                    MouseButton::Middle => self.buttons.middle = pressed,
                    _ => return false,
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                if let Some(old_pos) = self.cursor {
                    self.cursor_delta += new_pos - old_pos;
                }
                self.cursor = Some(new_pos);
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.wheel_ticks += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / WHEEL_PIXELS_PER_TICK,
                };
                false
            }
            _ => false,
        }
    }

    /// Clear accumulated per-tick state. Call once at the end of each tick.
    pub fn reset_deltas(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.wheel_ticks = 0.0;
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut KeyState {
        &mut self.keys
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Accumulated cursor movement since the last `reset_deltas`
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Accumulated wheel ticks since the last `reset_deltas`
    pub fn wheel_ticks(&self) -> f32 {
        self.wheel_ticks
    }

    fn keycode_to_key(keycode: KeyCode) -> Option<Key> {
        match keycode {
            KeyCode::KeyW => Some(Key::KeyW),
            KeyCode::KeyA => Some(Key::KeyA),
            KeyCode::KeyS => Some(Key::KeyS),
            KeyCode::KeyD => Some(Key::KeyD),
            KeyCode::KeyQ => Some(Key::KeyQ),
            KeyCode::KeyE => Some(Key::KeyE),
            KeyCode::KeyR => Some(Key::KeyR),
            KeyCode::ArrowUp => Some(Key::ArrowUp),
            KeyCode::ArrowDown => Some(Key::ArrowDown),
            KeyCode::ArrowLeft => Some(Key::ArrowLeft),
            KeyCode::ArrowRight => Some(Key::ArrowRight),
            KeyCode::Digit1 => Some(Key::Digit1),
            KeyCode::Digit2 => Some(Key::Digit2),
            KeyCode::Digit3 => Some(Key::Digit3),
            KeyCode::Digit4 => Some(Key::Digit4),
            KeyCode::Digit5 => Some(Key::Digit5),
            KeyCode::Digit6 => Some(Key::Digit6),
            KeyCode::Digit7 => Some(Key::Digit7),
            KeyCode::Digit8 => Some(Key::Digit8),
            KeyCode::Space => Some(Key::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Key::Shift),
            KeyCode::ControlLeft | KeyCode::ControlRight => Some(Key::Control),
            KeyCode::Escape => Some(Key::Escape),
            _ => None,
        }
    }
}
