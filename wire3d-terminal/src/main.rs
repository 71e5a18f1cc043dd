/// wire3d terminal demo - spinning wireframe
///
/// Renders an OBJ mesh (or a built-in cube) as a wireframe in the terminal.
/// Controls:
///   - W/S: Move away from / towards the model
///   - A/D: Move the model left / right
///   - Q/E: Move the model down / up
///   - V: Toggle vertex markers
///   - Esc / Ctrl-C: Quit
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};
use wire3d_core::{load_obj, FrameParams, Mesh, RenderConfig, Vec3};
use wire3d_terminal::{load_config, TerminalApp};

#[derive(Parser)]
#[command(name = "wire3d-terminal", about = "CPU wireframe renderer for the terminal")]
struct Cli {
    /// OBJ file to render; shows a cube when omitted
    mesh: Option<PathBuf>,

    /// RON file with render settings (colors, near plane, point size)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write diagnostics to this file, filtered by RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal is the render surface, so logs only go to a file
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };

    let (mesh, params) = match &cli.mesh {
        Some(path) => {
            let mesh = load_obj(path)
                .with_context(|| format!("failed to load mesh {}", path.display()))?;
            (mesh, FrameParams::new(0.0, Vec3::new(0.0, -1.0, 15.0)))
        }
        None => (Mesh::cube(0.5), FrameParams::new(0.0, Vec3::new(0.0, 0.0, 3.0))),
    };
    info!(
        "loaded {} vertices, {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );

    let mut app = TerminalApp::new(mesh, config, params)?;
    app.run()?;

    info!("exiting");
    Ok(())
}
