//! Terminal front end for the wire3d software renderer
use log::info;
use std::io;
use wire3d_core::frame::{self, Display, FrameLimiter, FrameStats};
use wire3d_core::{FramePipeline, Mesh, RenderConfig};

pub mod display;

pub use display::TerminalDisplay;

/// Front-end settings on top of the core [`RenderConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppOptions {
    pub config: RenderConfig,
    /// Buffer pixels per terminal half-cell, along each axis.
    pub scale: u32,
    /// Stop after this many frames. `None` runs until the user quits.
    pub max_frames: Option<u64>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            config: RenderConfig::default(),
            scale: 4,
            max_frames: None,
        }
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    // Declared first so the color buffer is released before the terminal is restored.
    pipeline: FramePipeline,
    display: TerminalDisplay,
    limiter: FrameLimiter,
    max_frames: Option<u64>,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, options: AppOptions) -> io::Result<Self> {
        let display = TerminalDisplay::new(options.scale)?;
        let (width, height) = display.size();
        let pipeline = FramePipeline::new(mesh, options.config, width, height)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        info!("setup complete: {}x{} color buffer", width, height);

        Ok(Self {
            pipeline,
            display,
            limiter: FrameLimiter::new(options.config.fps),
            max_frames: options.max_frames,
        })
    }

    pub fn run(&mut self) -> io::Result<FrameStats> {
        frame::run(
            &mut self.pipeline,
            &mut self.display,
            &mut self.limiter,
            self.max_frames,
        )
    }
}
