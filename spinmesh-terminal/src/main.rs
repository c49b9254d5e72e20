/// spinmesh terminal demo - a rotating wireframe of random triangles
///
/// Controls:
///   - Drag with the left button: rotate the mesh
///   - Scroll wheel: zoom
///   - Double-click / F: toggle fullscreen (hides the status line)
///   - Q/ESC: Quit

mod cli;

use spinmesh_core::{DampingMode, ViewportConfig};
use spinmesh_terminal::TerminalApp;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "spinmesh_core=info,spinmesh_terminal=info";

fn init_logging(args: &cli::Args) -> io::Result<()> {
    // Logging to the terminal would tear the frame, so it needs a file
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;

    let mut filter = EnvFilter::from_default_env();
    for directive in args
        .log_level
        .as_deref()
        .unwrap_or(DEFAULT_LOG_DIRECTIVE)
        .split(',')
    {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("ignoring log directive {directive:?}: {e}"),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(args: &cli::Args) -> io::Result<ViewportConfig> {
    let mut config = match &args.config {
        Some(path) => ViewportConfig::load(path).map_err(io::Error::other)?,
        None => ViewportConfig::default(),
    };

    if let Some(triangles) = args.triangles {
        config.triangle_count = triangles;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(reference_hz) = args.time_scaled {
        config.damping = DampingMode::TimeScaled { reference_hz };
    }

    config.validate().map_err(io::Error::other)?;
    Ok(config)
}

fn main() -> io::Result<()> {
    let args = cli::parse();
    init_logging(&args)?;

    tracing::info!("spinmesh-terminal v{} starting", env!("CARGO_PKG_VERSION"));
    let config = load_config(&args).inspect_err(|e| eprintln!("spinmesh: {e}"))?;

    let mut app = TerminalApp::new(config, args.fps)?;
    app.run()
}
