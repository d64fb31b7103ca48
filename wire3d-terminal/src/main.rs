//! wire3d terminal demo - rotating wireframe
//!
//! Renders the built-in cube, or any OBJ file given with `--mesh`, into a
//! software color buffer and shows it in the terminal.
//! Controls:
//!   - Q/ESC/Ctrl-C: Quit
use clap::Parser;
use log::{error, info};
use std::io;
use std::path::PathBuf;
use wire3d_core::{obj, Mesh, RenderConfig};
use wire3d_terminal::{AppOptions, TerminalApp};

#[derive(Debug, Parser)]
#[command(version, about = "Software wireframe renderer for the terminal")]
struct Args {
    /// OBJ file to render instead of the built-in cube
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Perspective scale factor
    #[arg(long, default_value_t = RenderConfig::default().fov_factor)]
    fov: f32,

    /// Camera position on the z axis
    #[arg(long, default_value_t = RenderConfig::default().camera_z, allow_hyphen_values = true)]
    camera_z: f32,

    /// Rotation added to every axis each frame, in radians
    #[arg(long, default_value_t = RenderConfig::default().rotation_per_frame, allow_hyphen_values = true)]
    rotation: f32,

    /// Target frames per second, 0 for unpaced
    #[arg(long, default_value_t = RenderConfig::default().fps)]
    fps: u32,

    /// Buffer pixels per terminal half-cell
    #[arg(long, default_value_t = AppOptions::default().scale)]
    scale: u32,

    /// Exit after this many frames
    #[arg(long)]
    frames: Option<u64>,
}

impl Args {
    fn options(&self) -> AppOptions {
        AppOptions {
            config: RenderConfig {
                fov_factor: self.fov,
                camera_z: self.camera_z,
                rotation_per_frame: self.rotation,
                fps: self.fps,
                ..RenderConfig::default()
            },
            scale: self.scale,
            max_frames: self.frames,
        }
    }

    fn load_mesh(&self) -> io::Result<Mesh> {
        match &self.mesh {
            Some(path) => obj::load_obj(path).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Failed to load {}: {}", path.display(), e),
                )
            }),
            None => Ok(Mesh::cube()),
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mesh = args.load_mesh().map_err(|e| {
        error!("{}", e);
        e
    })?;
    info!(
        "rendering {} vertices, {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );

    let mut app = TerminalApp::new(mesh, args.options()).map_err(|e| {
        error!("setup failed: {}", e);
        e
    })?;
    let stats = app.run()?;
    drop(app);

    println!("wire3d rendered {} frames", stats.frames);
    Ok(())
}
