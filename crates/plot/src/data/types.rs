//! GPU data representations for the plotter.

/// One vertex of the point buffer. Must match the `vertex_position`
/// attribute in `plot.vert.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct PointVertex {
    /// World-space (x, y) of the point.
    pub position: [f32; 2],
}

/// The single uniform consumed by the vertex shader. Must match the
/// `Transform` struct in `plot.vert.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    /// Orthographic view-projection matrix derived from the view state.
    pub transform: [[f32; 4]; 4],
}

/// GPU resources for the loaded point set, uploaded once at startup.
#[derive(Debug)]
pub struct PointsGpu {
    pub count: u32,

    /// Vertex buffer containing `PointVertex` data.
    pub vtx: wgpu::Buffer,
    /// Uniform buffer containing `TransformUniform` data.
    pub ubo: wgpu::Buffer,
    /// Bind group connecting the UBO to the pipeline.
    pub bind: wgpu::BindGroup,
}
