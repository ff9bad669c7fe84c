use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::PhysicalScale;
use crate::core::keyboard::{Key, KeyState};
use crate::math::{orthonormalize, rotation_matrix};

/// Factor applied per speed-modifier key press
const SPEED_STEP: f32 = 2.0;

/// Adjustable interaction speeds, persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedModifiers {
    /// Units per second for held movement keys
    pub move_speed: f32,
    /// Units per pixel for pan/zoom drags
    pub mouse_speed: f32,
    /// Degrees per pixel for rotate/orbit drags
    pub rotate_speed: f32,
    /// Units per wheel tick
    pub wheel_step: f32,
}

impl Default for SpeedModifiers {
    fn default() -> Self {
        Self {
            move_speed: 0.5,
            mouse_speed: 0.002,
            rotate_speed: 0.2,
            wheel_step: 0.05,
        }
    }
}

/// Currently held mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

/// Active mouse interaction, derived from the button bitmask and the Space
/// modifier. Always recomputed from the full current state on press/release,
/// never toggled incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseMode {
    #[default]
    None,
    Rotate,
    Orbit,
    Pan,
    Zoom,
    Measure,
}

impl MouseMode {
    pub fn from_input(buttons: MouseButtons, space_held: bool) -> Self {
        match (buttons.left, buttons.right, buttons.middle) {
            (true, true, false) => MouseMode::Measure,
            (true, false, false) => MouseMode::Rotate,
            (false, true, false) => MouseMode::Orbit,
            (false, false, true) if space_held => MouseMode::Zoom,
            (false, false, true) => MouseMode::Pan,
            _ => MouseMode::None,
        }
    }
}

/// Free-flying camera with a cross-section plane along its forward axis.
///
/// The orientation is an orthonormal 3x3 basis stored in a 4x4 matrix,
/// columns = (right, up, -forward). Every incremental rotation is followed by
/// re-orthonormalization so drift cannot accumulate into shear.
#[derive(Debug, Clone)]
pub struct CameraController {
    position: Vec3,
    orientation: Mat4,
    inverse_orientation: Mat4,
    plane_distance: f32,
    mode: MouseMode,
    orbit_pivot: Option<Vec3>,
    speeds: SpeedModifiers,
    height_ratio: f32,
    depth_ratio: f32,
}

impl CameraController {
    pub fn new(scale: PhysicalScale) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            orientation: Mat4::IDENTITY,
            inverse_orientation: Mat4::IDENTITY,
            plane_distance: 0.0,
            mode: MouseMode::None,
            orbit_pivot: None,
            speeds: SpeedModifiers::default(),
            height_ratio: scale.height_ratio(),
            depth_ratio: scale.depth_ratio(),
        };
        camera.reset_pose();
        camera
    }

    /// Restore the initial framing: camera centered in front of the volume,
    /// looking down -Z, with the cross-section plane through the volume center.
    pub fn reset_pose(&mut self) {
        self.orientation = Mat4::IDENTITY;
        self.inverse_orientation = Mat4::IDENTITY;
        self.position = Vec3::new(
            0.5,
            self.height_ratio * 0.5,
            self.depth_ratio + 0.5,
        );
        self.plane_distance = 0.5 + self.depth_ratio * 0.5;
    }

    pub fn reset_speeds(&mut self) {
        self.speeds = SpeedModifiers::default();
    }

    pub fn set_speeds(&mut self, speeds: SpeedModifiers) {
        self.speeds = speeds;
    }

    pub fn speeds(&self) -> SpeedModifiers {
        self.speeds
    }

    /// Recompute the mouse mode from the full current input state. Called on
    /// every button press and release.
    pub fn set_mouse_mode(&mut self, buttons: MouseButtons, space_held: bool) -> MouseMode {
        self.mode = MouseMode::from_input(buttons, space_held);
        if self.mode != MouseMode::Orbit {
            self.orbit_pivot = None;
        }
        self.mode
    }

    pub fn mode(&self) -> MouseMode {
        self.mode
    }

    /// Capture the orbit pivot at button-press time. A miss (no plane
    /// intersection under the cursor) leaves the orbit drag inert.
    pub fn begin_orbit(&mut self, pivot: Option<Vec3>) {
        self.orbit_pivot = pivot;
    }

    /// Per-tick continuous motion from held movement keys, plus edge-triggered
    /// speed-modifier and reset keys.
    pub fn update(&mut self, dt: f32, keys: &mut KeyState) {
        self.apply_speed_keys(keys);

        if keys.is_down_once(Key::KeyR) {
            if keys.is_down(Key::Control) {
                self.reset_speeds();
            } else {
                self.reset_pose();
            }
        }

        let mut speed = self.speeds.move_speed;
        if keys.is_down(Key::Shift) {
            speed *= 2.0;
        }
        if keys.is_down(Key::Control) {
            speed *= 0.5;
        }
        let step = speed * dt;

        if keys.is_down(Key::KeyW) || keys.is_down(Key::ArrowUp) {
            self.position += self.forward() * step;
        }
        if keys.is_down(Key::KeyS) || keys.is_down(Key::ArrowDown) {
            self.position -= self.forward() * step;
        }
        if keys.is_down(Key::KeyA) || keys.is_down(Key::ArrowLeft) {
            self.position -= self.right() * step;
        }
        if keys.is_down(Key::KeyD) || keys.is_down(Key::ArrowRight) {
            self.position += self.right() * step;
        }
        if keys.is_down(Key::KeyE) {
            self.position += self.up() * step;
        }
        if keys.is_down(Key::KeyQ) {
            self.position -= self.up() * step;
        }
    }

    fn apply_speed_keys(&mut self, keys: &mut KeyState) {
        let pairs = [
            (Key::Digit1, Key::Digit2),
            (Key::Digit3, Key::Digit4),
            (Key::Digit5, Key::Digit6),
            (Key::Digit7, Key::Digit8),
        ];
        for (slot, (up, down)) in pairs.iter().enumerate() {
            let factor = if keys.is_down_once(*up) {
                SPEED_STEP
            } else if keys.is_down_once(*down) {
                1.0 / SPEED_STEP
            } else {
                continue;
            };
            match slot {
                0 => self.speeds.move_speed *= factor,
                1 => self.speeds.mouse_speed *= factor,
                2 => self.speeds.rotate_speed *= factor,
                _ => self.speeds.wheel_step *= factor,
            }
        }
    }

    /// Mouse-drag motion for the active mode. `delta` is in pixels.
    /// Measurement drags are handled by the caller; they never move the camera.
    pub fn drag(&mut self, delta: Vec2, space_held: bool) {
        if delta == Vec2::ZERO {
            return;
        }
        match self.mode {
            MouseMode::Rotate => self.apply_rotation(delta, space_held),
            MouseMode::Orbit => self.orbit_step(delta, space_held),
            MouseMode::Pan => {
                self.position += (self.right() * -delta.x + self.up() * delta.y)
                    * self.speeds.mouse_speed
                    * self.plane_distance;
            }
            MouseMode::Zoom => {
                self.position += self.forward() * -delta.y * self.speeds.mouse_speed;
            }
            MouseMode::Measure | MouseMode::None => {}
        }
    }

    /// Dolly the camera along its forward axis while keeping the plane fixed
    /// relative to the volume: the plane distance absorbs the same delta with
    /// opposite sign.
    pub fn wheel(&mut self, ticks: f32, shift_held: bool, control_held: bool) {
        let mut step = self.speeds.wheel_step;
        if shift_held {
            step *= 2.0;
        }
        if control_held {
            step *= 0.5;
        }
        let delta = ticks * step;
        self.position += self.forward() * delta;
        self.plane_distance -= delta;
    }

    fn apply_rotation(&mut self, delta: Vec2, roll_mode: bool) {
        let rotation = if roll_mode {
            // Horizontal drag rolls about the forward axis; vertical ignored.
            rotation_matrix(-delta.x * self.speeds.rotate_speed, Vec3::Z)
        } else {
            let yaw = -delta.x * self.speeds.rotate_speed;
            let pitch = -delta.y * self.speeds.rotate_speed;
            rotation_matrix(yaw, Vec3::Y) * rotation_matrix(pitch, Vec3::X)
        };

        self.orientation = self.orientation * rotation;
        orthonormalize(&mut self.orientation);
        self.inverse_orientation = self.orientation.transpose();
    }

    fn orbit_step(&mut self, delta: Vec2, roll_mode: bool) {
        let Some(pivot) = self.orbit_pivot else {
            return;
        };
        let pivot_local = self
            .inverse_orientation
            .transform_vector3(pivot - self.position);

        self.apply_rotation(delta, roll_mode);

        // Keep the pivot at the same camera-local position, so it stays
        // fixed on screen while the camera swings around it.
        self.position = pivot - self.orientation.transform_vector3(pivot_local);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Mat4 {
        self.orientation
    }

    pub fn right(&self) -> Vec3 {
        self.orientation.x_axis.truncate()
    }

    pub fn up(&self) -> Vec3 {
        self.orientation.y_axis.truncate()
    }

    pub fn forward(&self) -> Vec3 {
        -self.orientation.z_axis.truncate()
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.inverse_orientation * Mat4::from_translation(-self.position)
    }

    pub fn plane_distance(&self) -> f32 {
        self.plane_distance
    }

    pub fn plane_position(&self) -> Vec3 {
        self.position + self.forward() * self.plane_distance
    }

    pub fn plane_normal(&self) -> Vec3 {
        -self.forward()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraController {
        CameraController::new(PhysicalScale::default())
    }

    fn assert_orthonormal(m: &Mat4) {
        let x = m.x_axis.truncate();
        let y = m.y_axis.truncate();
        let z = m.z_axis.truncate();
        assert!((x.length() - 1.0).abs() < 1e-5);
        assert!((y.length() - 1.0).abs() < 1e-5);
        assert!((z.length() - 1.0).abs() < 1e-5);
        assert!(x.dot(y).abs() < 1e-5);
        assert!(x.dot(z).abs() < 1e-5);
        assert!(y.dot(z).abs() < 1e-5);
    }

    #[test]
    fn mode_is_pure_function_of_buttons_and_space() {
        let case = |left, right, middle, space| {
            MouseMode::from_input(
                MouseButtons {
                    left,
                    right,
                    middle,
                },
                space,
            )
        };
        assert_eq!(case(true, false, false, false), MouseMode::Rotate);
        assert_eq!(case(false, true, false, false), MouseMode::Orbit);
        assert_eq!(case(false, false, true, false), MouseMode::Pan);
        assert_eq!(case(false, false, true, true), MouseMode::Zoom);
        assert_eq!(case(true, true, false, false), MouseMode::Measure);
        assert_eq!(case(true, true, true, true), MouseMode::None);
        assert_eq!(case(false, false, false, false), MouseMode::None);
    }

    #[test]
    fn reset_centers_plane_in_volume() {
        let scale = PhysicalScale {
            width: 100.0,
            height: 100.0,
            depth: 40.0,
        };
        let camera = CameraController::new(scale);

        let plane = camera.plane_position();
        assert!((plane.x - 0.5).abs() < 1e-6);
        assert!((plane.y - 0.5).abs() < 1e-6);
        assert!((plane.z - 0.2).abs() < 1e-6, "plane z: {}", plane.z);
    }

    #[test]
    fn orientation_stays_orthonormal_over_drag_sequence() {
        let mut camera = camera();
        camera.set_mouse_mode(
            MouseButtons {
                left: true,
                ..Default::default()
            },
            false,
        );
        for i in 0..500 {
            let delta = Vec2::new((i % 13) as f32 - 6.0, (i % 7) as f32 - 3.0);
            camera.drag(delta, i % 5 == 0);
            assert_orthonormal(&camera.orientation());
        }
    }

    #[test]
    fn move_speed_modified_by_shift_and_control() {
        let step = |shift: bool, control: bool| {
            let mut camera = camera();
            let start = camera.position();
            let mut keys = KeyState::new();
            keys.set_down(Key::KeyW);
            if shift {
                keys.set_down(Key::Shift);
            }
            if control {
                keys.set_down(Key::Control);
            }
            camera.update(1.0, &mut keys);
            (camera.position() - start).dot(camera.forward())
        };

        let base = step(false, false);
        assert!((step(true, false) - base * 2.0).abs() < 1e-5);
        assert!((step(false, true) - base * 0.5).abs() < 1e-5);
        assert!((step(true, true) - base).abs() < 1e-5);
    }

    #[test]
    fn speed_modifier_fires_once_while_held() {
        let mut camera = camera();
        let base = camera.speeds().move_speed;
        let mut keys = KeyState::new();
        keys.set_down(Key::Digit1);

        for _ in 0..10 {
            camera.update(0.016, &mut keys);
        }
        assert!((camera.speeds().move_speed - base * 2.0).abs() < 1e-6);

        keys.set_up(Key::Digit1);
        keys.set_down(Key::Digit1);
        camera.update(0.016, &mut keys);
        assert!((camera.speeds().move_speed - base * 4.0).abs() < 1e-6);
    }

    #[test]
    fn wheel_moves_camera_and_plane_in_lockstep() {
        let mut camera = camera();
        let position_before = camera.position();
        let plane_before = camera.plane_distance();

        camera.wheel(3.0, false, false);

        let moved = (camera.position() - position_before).dot(camera.forward());
        let plane_delta = camera.plane_distance() - plane_before;
        assert!((plane_delta + moved).abs() < 1e-6);
        assert!(moved > 0.0);
    }

    #[test]
    fn wheel_step_scaled_by_modifiers() {
        let dolly = |shift, control| {
            let mut camera = camera();
            let before = camera.position();
            camera.wheel(1.0, shift, control);
            (camera.position() - before).dot(camera.forward())
        };
        let base = dolly(false, false);
        assert!((dolly(true, false) - base * 2.0).abs() < 1e-6);
        assert!((dolly(false, true) - base * 0.5).abs() < 1e-6);
    }

    #[test]
    fn pan_scales_with_plane_distance() {
        let mut near = camera();
        let mut far = camera();
        far.wheel(-10.0, false, false); // pull the plane further out

        let buttons = MouseButtons {
            middle: true,
            ..Default::default()
        };
        near.set_mouse_mode(buttons, false);
        far.set_mouse_mode(buttons, false);

        let near_start = near.position();
        let far_start = far.position();
        near.drag(Vec2::new(100.0, 0.0), false);
        far.drag(Vec2::new(100.0, 0.0), false);

        let near_moved = (near.position() - near_start).length();
        let far_moved = (far.position() - far_start).length();
        assert!(far_moved > near_moved);
    }

    #[test]
    fn orbit_without_pivot_is_inert() {
        let mut camera = camera();
        camera.set_mouse_mode(
            MouseButtons {
                right: true,
                ..Default::default()
            },
            false,
        );
        camera.begin_orbit(None);

        let position = camera.position();
        let orientation = camera.orientation();
        camera.drag(Vec2::new(25.0, 10.0), false);

        assert_eq!(camera.position(), position);
        assert_eq!(camera.orientation(), orientation);
    }

    #[test]
    fn orbit_keeps_pivot_at_same_camera_local_position() {
        let mut camera = camera();
        camera.set_mouse_mode(
            MouseButtons {
                right: true,
                ..Default::default()
            },
            false,
        );
        let pivot = camera.plane_position();
        camera.begin_orbit(Some(pivot));

        let local_before = camera
            .view_matrix()
            .transform_point3(pivot);
        camera.drag(Vec2::new(40.0, -15.0), false);
        let local_after = camera.view_matrix().transform_point3(pivot);

        assert!((local_after - local_before).length() < 1e-4);
    }

    #[test]
    fn reset_key_restores_pose_and_control_variant_restores_speeds() {
        let mut camera = camera();
        let home = camera.position();

        let mut keys = KeyState::new();
        keys.set_down(Key::KeyW);
        camera.update(1.0, &mut keys);
        keys.set_up(Key::KeyW);
        assert_ne!(camera.position(), home);

        keys.set_down(Key::KeyR);
        camera.update(0.0, &mut keys);
        keys.set_up(Key::KeyR);
        assert!((camera.position() - home).length() < 1e-6);

        keys.set_down(Key::Digit1);
        camera.update(0.0, &mut keys);
        keys.set_up(Key::Digit1);
        assert_ne!(camera.speeds(), SpeedModifiers::default());

        keys.set_down(Key::Control);
        keys.set_down(Key::KeyR);
        camera.update(0.0, &mut keys);
        assert_eq!(camera.speeds(), SpeedModifiers::default());
    }

    #[test]
    fn view_matrix_inverts_pose() {
        let mut camera = camera();
        camera.set_mouse_mode(
            MouseButtons {
                left: true,
                ..Default::default()
            },
            false,
        );
        camera.drag(Vec2::new(33.0, -21.0), false);

        let eye_local = camera.view_matrix().transform_point3(camera.position());
        assert!(eye_local.length() < 1e-5);

        let ahead = camera.position() + camera.forward() * 2.0;
        let ahead_local = camera.view_matrix().transform_point3(ahead);
        assert!((ahead_local - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-4);
    }
}
