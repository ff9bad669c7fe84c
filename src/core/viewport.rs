use glam::{Mat4, Vec2};

const FOV_Y_DEGREES: f32 = 45.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Projection parameters for the render surface.
///
/// The projection matrix is recomputed on resize only; combined
/// view-projection matrices are formed every tick since the view changes
/// every tick.
#[derive(Debug, Clone, Copy)]
pub struct ViewportState {
    size: Vec2,
    projection: Mat4,
}

impl ViewportState {
    pub fn new(width: u32, height: u32) -> Self {
        let mut state = Self {
            size: Vec2::ONE,
            projection: Mat4::IDENTITY,
        };
        state.resize(width, height);
        state
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        self.size = Vec2::new(width, height);
        self.projection = Mat4::perspective_rh(
            FOV_Y_DEGREES.to_radians(),
            width / height,
            NEAR_PLANE,
            FAR_PLANE,
        );
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self, view: Mat4) -> Mat4 {
        self.projection * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn resize_updates_aspect() {
        let mut viewport = ViewportState::new(800, 600);
        let before = viewport.projection();
        viewport.resize(1600, 600);
        assert_ne!(before, viewport.projection());
        assert_eq!(viewport.size(), Vec2::new(1600.0, 600.0));
    }

    #[test]
    fn zero_size_is_clamped() {
        let viewport = ViewportState::new(0, 0);
        assert_eq!(viewport.size(), Vec2::ONE);
        assert!(viewport.projection().is_finite());
    }

    #[test]
    fn projects_point_ahead_of_camera_into_clip_space() {
        let viewport = ViewportState::new(800, 600);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let clip = viewport.view_projection(view) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
