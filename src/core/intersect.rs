use glam::{Mat4, Vec2, Vec3, Vec4};

/// Rays closer to parallel than this are rejected.
const EPSILON: f32 = 1e-9;

/// Ray-plane intersection result
#[derive(Debug, Clone, Copy)]
pub struct PlaneHit {
    /// World-space intersection point
    pub point: Vec3,
    /// Distance along the ray from the camera
    pub t: f32,
}

/// Cast a ray from a screen point through the camera and intersect it with
/// the cross-section plane.
///
/// The screen point is converted to normalized device coordinates (Y flipped),
/// unprojected through the inverse view-projection onto the far plane, and the
/// resulting ray is solved against the plane. Returns `None` when the ray is
/// parallel to the plane or the intersection lies at or behind the camera;
/// callers skip the gesture on a miss. `t == 0` counts as behind: a hit on
/// the camera itself carries no usable world point.
pub fn intersect_plane(
    screen: Vec2,
    viewport: Vec2,
    projection: Mat4,
    view: Mat4,
    camera_position: Vec3,
    plane_position: Vec3,
    plane_normal: Vec3,
) -> Option<PlaneHit> {
    let ndc = (screen / viewport - Vec2::splat(0.5)) * Vec2::new(2.0, -2.0);

    let far = (projection * view).inverse() * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let far = far.truncate() / far.w;

    let ray_dir = (far - camera_position).normalize();

    let denom = ray_dir.dot(plane_normal);
    if denom.abs() < EPSILON {
        return None;
    }

    let t = (plane_position - camera_position).dot(plane_normal) / denom;
    if t <= 0.0 {
        return None;
    }

    Some(PlaneHit {
        point: camera_position + ray_dir * t,
        t,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn look_down_negative_z(position: Vec3) -> Mat4 {
        Mat4::look_at_rh(position, position - Vec3::Z, Vec3::Y)
    }

    fn projection() -> Mat4 {
        Mat4::perspective_rh(45.0_f32.to_radians(), 800.0 / 600.0, 0.1, 100.0)
    }

    #[test]
    fn screen_center_hits_plane_straight_ahead() {
        let camera = Vec3::new(0.0, 0.0, 5.0);
        let hit = intersect_plane(
            Vec2::new(400.0, 300.0),
            Vec2::new(800.0, 600.0),
            projection(),
            look_down_negative_z(camera),
            camera,
            Vec3::ZERO,
            Vec3::Z,
        )
        .expect("center ray must hit");

        assert!((hit.t - 5.0).abs() < 1e-3);
        assert!(hit.point.length() < 1e-3);
    }

    #[test]
    fn off_center_point_lies_on_plane() {
        let camera = Vec3::new(0.0, 0.0, 5.0);
        let hit = intersect_plane(
            Vec2::new(620.0, 130.0),
            Vec2::new(800.0, 600.0),
            projection(),
            look_down_negative_z(camera),
            camera,
            Vec3::ZERO,
            Vec3::Z,
        )
        .expect("ray must hit");

        assert!(hit.point.z.abs() < 1e-3);
        assert!(hit.point.x > 0.0, "right of center maps to +x");
        assert!(hit.point.y > 0.0, "above center maps to +y");
    }

    #[test]
    fn parallel_ray_is_rejected() {
        // Plane normal perpendicular to the view direction; rays along the
        // horizontal screen midline run parallel to the plane.
        let camera = Vec3::new(0.0, 5.0, 0.0);
        for x in [0.0, 150.0, 400.0, 799.0] {
            let hit = intersect_plane(
                Vec2::new(x, 300.0),
                Vec2::new(800.0, 600.0),
                projection(),
                look_down_negative_z(camera),
                camera,
                Vec3::new(0.0, 5.0, -10.0),
                Vec3::Y,
            );
            assert!(hit.is_none(), "parallel ray at x={} must miss", x);
        }
    }

    #[test]
    fn plane_through_camera_is_rejected() {
        let camera = Vec3::new(0.0, 0.0, 5.0);
        let hit = intersect_plane(
            Vec2::new(400.0, 300.0),
            Vec2::new(800.0, 600.0),
            projection(),
            look_down_negative_z(camera),
            camera,
            camera,
            Vec3::Z,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn intersection_behind_camera_is_rejected() {
        let camera = Vec3::new(0.0, 0.0, 5.0);
        let hit = intersect_plane(
            Vec2::new(400.0, 300.0),
            Vec2::new(800.0, 600.0),
            projection(),
            look_down_negative_z(camera),
            camera,
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::Z,
        );
        assert!(hit.is_none());
    }
}
