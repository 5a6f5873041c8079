//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Animated earth/moon orbit viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Sphere longitude segments.
    #[arg(long)]
    pub width_segments: Option<u32>,

    /// Sphere latitude bands.
    #[arg(long)]
    pub height_segments: Option<u32>,

    /// Earth radius in clip-space units.
    #[arg(long)]
    pub earth_radius: Option<f32>,

    /// Moon radius in clip-space units.
    #[arg(long)]
    pub moon_radius: Option<f32>,

    /// Initial zoom.
    #[arg(long)]
    pub scale: Option<f32>,

    /// Draw the wireframe overlay.
    #[arg(long)]
    pub wireframe: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ws) = args.width_segments {
            self.scene.width_segments = ws;
        }
        if let Some(hs) = args.height_segments {
            self.scene.height_segments = hs;
        }
        if let Some(r) = args.earth_radius {
            self.scene.earth_radius = r;
        }
        if let Some(r) = args.moon_radius {
            self.scene.moon_radius = r;
        }
        if let Some(s) = args.scale {
            self.scene.scale = s;
        }
        if let Some(wf) = args.wireframe {
            self.debug.wireframe = wf;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
