//! Example: Load and render an OBJ file in the terminal
//!
//! Usage: cargo run --example load_obj -- path/to/file.obj
use std::env;
use std::io;
use wire3d_core::obj;
use wire3d_terminal::{AppOptions, TerminalApp};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using default cube...");
        let mut app = TerminalApp::new(wire3d_core::Mesh::cube(), AppOptions::default())?;
        app.run()?;
        return Ok(());
    }

    let obj_path = &args[1];

    println!("Loading OBJ file: {}", obj_path);

    let mesh = obj::load_obj(obj_path).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to load OBJ: {}", e),
        )
    })?;

    println!(
        "Loaded {} vertices, {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh, AppOptions::default())?;
    let stats = app.run()?;
    drop(app);

    println!("Rendered {} frames", stats.frames);
    Ok(())
}
