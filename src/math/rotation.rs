use glam::{Mat4, Vec3, Vec4};

/// Rotation matrix around an arbitrary unit-length axis (Rodrigues' formula).
///
/// Angle is given in degrees. Returns a full 4x4 with zero translation.
pub fn rotation_matrix(angle_degrees: f32, axis: Vec3) -> Mat4 {
    let angle = angle_degrees.to_radians();
    let (sin, cos) = angle.sin_cos();
    let one_minus_cos = 1.0 - cos;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    Mat4::from_cols(
        Vec4::new(
            cos + x * x * one_minus_cos,
            y * x * one_minus_cos + z * sin,
            z * x * one_minus_cos - y * sin,
            0.0,
        ),
        Vec4::new(
            x * y * one_minus_cos - z * sin,
            cos + y * y * one_minus_cos,
            z * y * one_minus_cos + x * sin,
            0.0,
        ),
        Vec4::new(
            x * z * one_minus_cos + y * sin,
            y * z * one_minus_cos - x * sin,
            cos + z * z * one_minus_cos,
            0.0,
        ),
        Vec4::W,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_x_around_z_by_90_degrees() {
        let m = rotation_matrix(90.0, Vec3::Z);
        let v = m.transform_vector3(Vec3::X);
        assert!((v - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn zero_angle_is_identity() {
        let m = rotation_matrix(0.0, Vec3::new(0.3, 0.5, 0.8).normalize());
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn matches_glam_axis_angle() {
        let axis = Vec3::new(1.0, 2.0, -0.5).normalize();
        let ours = rotation_matrix(37.0, axis);
        let reference = Mat4::from_axis_angle(axis, 37.0_f32.to_radians());
        assert!(ours.abs_diff_eq(reference, 1e-5));
    }

    #[test]
    fn has_zero_translation_and_unit_w() {
        let m = rotation_matrix(123.0, Vec3::Y);
        assert_eq!(m.w_axis, Vec4::W);
        assert_eq!(m.x_axis.w, 0.0);
        assert_eq!(m.y_axis.w, 0.0);
        assert_eq!(m.z_axis.w, 0.0);
    }
}
