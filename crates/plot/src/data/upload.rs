use crate::data::types::{PointVertex, PointsGpu, TransformUniform};
use crate::view::ViewState;
use plotfile::PointSet;
use wgpu::util::DeviceExt;

/// Upload a loaded point set to the GPU: vertex buffer, `Transform` UBO
/// seeded from the current view, and the bind group tying them to the
/// pipeline.
pub fn upload_points(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &ViewState,
    set: &PointSet,
) -> PointsGpu {
    let vertices: Vec<PointVertex> = set
        .points
        .iter()
        .map(|&position| PointVertex { position })
        .collect();

    let vtx = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Plot Points VB"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let ubo_data = TransformUniform {
        transform: view.view_proj().to_cols_array_2d(),
    };

    let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Plot Transform UBO"),
        contents: bytemuck::bytes_of(&ubo_data),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Plot Transform BindGroup"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: ubo.as_entire_binding(),
        }],
    });

    PointsGpu {
        count: vertices.len() as u32,
        vtx,
        ubo,
        bind,
    }
}
