use crate::{
    data::{upload_points, PointsGpu, TransformUniform},
    renderer::Renderer,
    view::{ViewController, ViewState},
};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use winit::{event::WindowEvent, window::Window};

/// Process-lifetime application state: the renderer, the mutable view, and
/// the immutable point set on the GPU.
pub struct App {
    pub renderer: Renderer,
    pub view: ViewState,
    pub controller: ViewController,
    pub points: Option<PointsGpu>,
}

impl App {
    pub async fn new(window: Arc<Window>, shader_dir: &Path) -> Result<Self> {
        let renderer = Renderer::new(window, shader_dir).await?;

        Ok(Self {
            renderer,
            view: ViewState::default(),
            controller: ViewController::new(),
            points: None,
        })
    }

    /// Reads the point file and uploads it once. Any failure here is fatal
    /// to the process.
    pub fn load_points(&mut self, path: &Path) -> Result<()> {
        log::info!("Reading points from input file");

        let set = plotfile::read_file(path)
            .with_context(|| format!("failed to open input file: {}", path.display()))?;

        log::info!("Loaded {} points from {}", set.len(), path.display());

        // Bounds are metadata only; nothing sizes the view from them.
        if let Some(b) = set.bounds() {
            log::debug!(
                "point bounds: min ({}, {}) max ({}, {})",
                b.min[0], b.min[1], b.max[0], b.max[1]
            );
        }

        self.points = Some(upload_points(
            &self.renderer.gfx.device,
            &self.renderer.points.transform_layout,
            &self.view,
            &set,
        ));

        Ok(())
    }

    /// Forwards pointer events to the view controller.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.controller.handle_event(event, &mut self.view);
    }

    /// Pushes the current view transform and draws one frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.renderer.gfx.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // The projection matrix is derived state: rebuild it from the view
        // every frame rather than tracking mutations.
        if let Some(points) = &self.points {
            let ubo_data = TransformUniform {
                transform: self.view.view_proj().to_cols_array_2d(),
            };

            self.renderer
                .gfx
                .queue
                .write_buffer(&points.ubo, 0, bytemuck::bytes_of(&ubo_data));
        }

        self.renderer.render(&swap_view, self.points.as_ref());
        frame.present();

        Ok(())
    }
}
