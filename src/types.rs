use glam::{Mat4, Vec3};

/// Per-object uniform for the line pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineUniform {
    pub mvp: [[f32; 4]; 4],
}

impl LineUniform {
    pub fn new(mvp: Mat4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
        }
    }
}

/// Colored line vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// Uniform for the cross-section plane pipeline. `inv_extent` maps world
/// coordinates into 3D texture coordinates (vec4 for WGSL alignment).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneUniform {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub inv_extent: [f32; 4],
}

impl PlaneUniform {
    pub fn new(mvp: Mat4, model: Mat4, extent: Vec3) -> Self {
        // Metadata can leave an axis at zero; treat it as unit extent so the
        // texture-coordinate mapping stays finite.
        let inv = |e: f32| if e > 0.0 { 1.0 / e } else { 1.0 };
        Self {
            mvp: mvp.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            inv_extent: [inv(extent.x), inv(extent.y), inv(extent.z), 0.0],
        }
    }
}

/// Plane quad vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
}
