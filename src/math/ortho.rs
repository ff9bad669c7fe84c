use glam::{Mat4, Vec4};

/// Re-orthonormalize the 3x3 basis of a rotation matrix via Gram-Schmidt.
///
/// Columns are processed in fixed x, y, z order: the x axis is kept exact and
/// accumulated error is pushed into the z (forward) axis. Incremental rotation
/// composition drifts into shear otherwise.
pub fn orthonormalize(matrix: &mut Mat4) {
    let x = matrix.x_axis.truncate();
    let y = matrix.y_axis.truncate();
    let z = matrix.z_axis.truncate();

    let x = x.normalize();
    let y = (y - y.dot(x) * x).normalize();
    let z = (z - z.dot(x) * x - z.dot(y) * y).normalize();

    matrix.x_axis = Vec4::new(x.x, x.y, x.z, 0.0);
    matrix.y_axis = Vec4::new(y.x, y.y, y.z, 0.0);
    matrix.z_axis = Vec4::new(z.x, z.y, z.z, 0.0);
}
