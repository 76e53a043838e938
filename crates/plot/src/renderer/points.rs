use crate::data::types::{PointVertex, PointsGpu, TransformUniform};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// File names of the two shader stages, resolved against the shader
/// directory passed at startup.
pub const VERT_SHADER_FILE: &str = "plot.vert.wgsl";
pub const FRAG_SHADER_FILE: &str = "plot.frag.wgsl";

/// Renders the point set with a 1 px `PointList` pipeline. The shader
/// interface is exactly one `Transform` mat4 uniform plus one
/// `vertex_position` vec2 attribute.
pub struct PointsPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub transform_layout: wgpu::BindGroupLayout,
}

impl PointsPipeline {
    /// Builds the pipeline from the two WGSL files in `shader_dir`.
    ///
    /// A missing file or a shader that fails validation is a hard error;
    /// the plotter never draws with a broken program.
    pub fn new(
        device: &wgpu::Device,
        color_fmt: wgpu::TextureFormat,
        shader_dir: &Path,
    ) -> Result<Self> {
        let vert = load_shader(device, &shader_dir.join(VERT_SHADER_FILE))?;
        let frag = load_shader(device, &shader_dir.join(FRAG_SHADER_FILE))?;

        let transform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Plot Transform UBO Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<TransformUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let vbuf_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                shader_location: 0,
                offset: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        };

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Plot Points PipelineLayout"),
            bind_group_layouts: &[&transform_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Plot Points Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vert,
                entry_point: "vs_main",
                buffers: &[vbuf_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: None,
            fragment: Some(wgpu::FragmentState {
                module: &frag,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_fmt,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            bail!("shader program failed to link: {err}");
        }

        log::info!("Shader program is built");

        Ok(Self {
            pipeline,
            transform_layout,
        })
    }

    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, points: &'a PointsGpu) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &points.bind, &[]);
        rpass.set_vertex_buffer(0, points.vtx.slice(..));
        rpass.draw(0..points.count, 0..1);
    }
}

/// Reads one WGSL file and compiles it, surfacing validation errors
/// synchronously.
fn load_shader(device: &wgpu::Device, path: &Path) -> Result<wgpu::ShaderModule> {
    log::info!("Compiling shader from file: {}", path.display());

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to open shader source file: {}", path.display()))?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: path.file_name().and_then(|n| n.to_str()),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        bail!("shader {} failed to compile: {err}", path.display());
    }

    Ok(module)
}
