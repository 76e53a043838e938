//! Entry point for the plot application.

use anyhow::Result;
use clap::Parser;
use plot::app::App;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const WINDOW_TITLE: &str = "plot";

#[derive(Parser, Debug)]
#[command(name = "plot", version, about = "Interactive 2D point plotter")]
struct Args {
    /// Input file with chart points
    #[arg(short, long)]
    input: PathBuf,

    /// Directory holding plot.vert.wgsl and plot.frag.wgsl.
    /// Defaults to "shaders" next to the executable.
    #[arg(long)]
    shaders: Option<PathBuf>,
}

/// `shaders/` next to the executable, falling back to the working
/// directory when the executable path is unavailable or the directory
/// does not exist (e.g. under `cargo run`).
fn default_shader_dir() -> PathBuf {
    let exe_relative = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .map(|d| d.join("shaders"));

    match exe_relative {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from("shaders"),
    }
}

fn main() -> Result<()> {
    // Initialize logging; default to "info" if RUST_LOG is unset.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let args = Args::parse();
    let shader_dir = args.shaders.unwrap_or_else(default_shader_dir);

    // Create the event loop and the fixed-size window.
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    // Initialise the application (async → sync).
    let mut app = pollster::block_on(App::new(window.clone(), &shader_dir))?;

    // One-shot point load; a bad input file is fatal.
    app.load_points(&args.input)?;

    log::info!("Initialization done");

    // Run the winit event loop.
    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => {
                app.handle_event(&event);

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::RedrawRequested => {
                        match app.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                app.renderer.gfx.reconfigure();
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("WGPU out of memory – exiting.");
                                elwt.exit();
                            }
                            Err(e) => log::error!("Render error: {:?}", e),
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                // Request a redraw each frame.
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
