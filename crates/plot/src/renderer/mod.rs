//! The rendering orchestrator. Owns the GPU context and the points
//! pipeline and records the one pass the plotter draws per frame.

pub mod context;
pub mod points;

use self::{context::GfxContext, points::PointsPipeline};
use crate::data::types::PointsGpu;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use winit::window::Window;

pub struct Renderer {
    pub gfx: GfxContext,
    pub points: PointsPipeline,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, shader_dir: &Path) -> Result<Self> {
        let gfx = GfxContext::new(window).await?;
        let points = PointsPipeline::new(&gfx.device, gfx.config.format, shader_dir)?;

        Ok(Self { gfx, points })
    }

    /// Clears the frame to black and draws the point set, if one is loaded.
    pub fn render(&self, swap_view: &wgpu::TextureView, points: Option<&PointsGpu>) {
        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Points Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(points) = points {
                self.points.draw(&mut pass, points);
            }
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }
}
