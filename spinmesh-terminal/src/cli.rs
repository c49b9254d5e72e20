use clap::Parser;
use std::path::PathBuf;

/// A rotating wireframe of random triangles, drawn in the terminal.
#[derive(Parser, Debug)]
#[command(name = "spinmesh-terminal", version, about)]
pub struct Args {
    /// TOML config file; missing keys keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of random triangles (overrides the config)
    #[arg(short, long)]
    pub triangles: Option<usize>,

    /// Seed for the mesh generator (overrides the config)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Scale damping by frame time, tuned for this refresh rate in Hz
    #[arg(long, value_name = "HZ")]
    pub time_scaled: Option<f32>,

    /// Write logs to this file (the terminal is taken by the renderer)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "spinmesh_core=debug"
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_overrides_parse() {
        let args = Args::parse_from([
            "spinmesh-terminal",
            "--triangles",
            "120",
            "--seed",
            "9",
            "--time-scaled",
            "60",
        ]);
        assert_eq!(args.triangles, Some(120));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.time_scaled, Some(60.0));
        assert_eq!(args.fps, 30);
        assert!(args.config.is_none());
    }
}
