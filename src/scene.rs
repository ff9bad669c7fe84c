use glam::Vec3;

use crate::types::{LineVertex, PlaneVertex};

/// World-space side length of the cross-section plane quad
pub const PLANE_SIZE: f32 = 4.0;

const CUBE_COLOR: [f32; 3] = [0.6, 0.6, 0.6];
const MEASURE_COLOR: [f32; 3] = [1.0, 0.9, 0.1];

/// Wireframe of the volume bounding box from the origin to `extent`.
pub fn cube_wireframe(extent: Vec3) -> Vec<LineVertex> {
    let corner = |x: f32, y: f32, z: f32| Vec3::new(x * extent.x, y * extent.y, z * extent.z);
    let edges = [
        // Bottom face
        (corner(0.0, 0.0, 0.0), corner(1.0, 0.0, 0.0)),
        (corner(1.0, 0.0, 0.0), corner(1.0, 1.0, 0.0)),
        (corner(1.0, 1.0, 0.0), corner(0.0, 1.0, 0.0)),
        (corner(0.0, 1.0, 0.0), corner(0.0, 0.0, 0.0)),
        // Top face
        (corner(0.0, 0.0, 1.0), corner(1.0, 0.0, 1.0)),
        (corner(1.0, 0.0, 1.0), corner(1.0, 1.0, 1.0)),
        (corner(1.0, 1.0, 1.0), corner(0.0, 1.0, 1.0)),
        (corner(0.0, 1.0, 1.0), corner(0.0, 0.0, 1.0)),
        // Verticals
        (corner(0.0, 0.0, 0.0), corner(0.0, 0.0, 1.0)),
        (corner(1.0, 0.0, 0.0), corner(1.0, 0.0, 1.0)),
        (corner(1.0, 1.0, 0.0), corner(1.0, 1.0, 1.0)),
        (corner(0.0, 1.0, 0.0), corner(0.0, 1.0, 1.0)),
    ];

    edges
        .iter()
        .flat_map(|(a, b)| [LineVertex::new(*a, CUBE_COLOR), LineVertex::new(*b, CUBE_COLOR)])
        .collect()
}

/// Coordinate axes from the origin: x red, y green, z blue.
pub fn axis_lines(length: f32) -> Vec<LineVertex> {
    vec![
        LineVertex::new(Vec3::ZERO, [1.0, 0.2, 0.2]),
        LineVertex::new(Vec3::X * length, [1.0, 0.2, 0.2]),
        LineVertex::new(Vec3::ZERO, [0.2, 1.0, 0.2]),
        LineVertex::new(Vec3::Y * length, [0.2, 1.0, 0.2]),
        LineVertex::new(Vec3::ZERO, [0.2, 0.4, 1.0]),
        LineVertex::new(Vec3::Z * length, [0.2, 0.4, 1.0]),
    ]
}

/// Unit quad for the cross-section plane, spanning [-0.5, 0.5] in local XY.
pub fn plane_quad() -> Vec<PlaneVertex> {
    let v = |x: f32, y: f32| PlaneVertex {
        position: [x, y, 0.0],
    };
    vec![
        v(-0.5, -0.5),
        v(0.5, -0.5),
        v(0.5, 0.5),
        v(-0.5, -0.5),
        v(0.5, 0.5),
        v(-0.5, 0.5),
    ]
}

/// Measurement segment endpoints
pub fn measurement_line(start: Vec3, end: Vec3) -> [LineVertex; 2] {
    [
        LineVertex::new(start, MEASURE_COLOR),
        LineVertex::new(end, MEASURE_COLOR),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_twelve_edges() {
        let verts = cube_wireframe(Vec3::new(1.0, 0.5, 0.25));
        assert_eq!(verts.len(), 24);
        for v in &verts {
            assert!(v.position[0] <= 1.0);
            assert!(v.position[1] <= 0.5);
            assert!(v.position[2] <= 0.25);
        }
    }

    #[test]
    fn axes_are_axis_aligned() {
        let verts = axis_lines(1.2);
        assert_eq!(verts.len(), 6);
        assert_eq!(verts[1].position, [1.2, 0.0, 0.0]);
        assert_eq!(verts[3].position, [0.0, 1.2, 0.0]);
        assert_eq!(verts[5].position, [0.0, 0.0, 1.2]);
    }

    #[test]
    fn plane_quad_is_two_triangles() {
        assert_eq!(plane_quad().len(), 6);
    }
}
