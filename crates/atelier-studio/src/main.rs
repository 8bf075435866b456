//! Studio: opens a window and runs the atelier exercises.

mod host;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use atelier_engine::device::GpuInit;
use atelier_engine::logging::{init_logging, LoggingConfig};
use atelier_engine::window::{Runtime, RuntimeConfig};
use atelier_scenes::raytrace::{render_image, TraceSettings};
use atelier_scenes::{SceneConfig, SceneKind};

use host::SceneHost;

#[derive(Debug, Parser)]
#[command(name = "atelier", version, about = "Five real-time rendering exercises")]
struct Cli {
    /// Scene shown at startup: landscape, shading, environment, shadows or raytrace.
    #[arg(long, default_value = "landscape")]
    scene: SceneKind,

    /// Directory holding the textures, cube-map faces and teapot.json.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Edge length of the square shadow map, in texels.
    #[arg(long, default_value_t = 4096)]
    shadow_map_size: u32,

    /// Log filter, e.g. "debug" or "atelier_scenes=trace". Overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,

    /// Trace the ray-tracing scene on the CPU into this PNG and exit.
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.clone().map(LoggingConfig::with_filter).unwrap_or_default());

    if let Some(path) = &cli.snapshot {
        return snapshot(path, cli.width, cli.height);
    }

    let config = SceneConfig {
        assets: cli.assets.clone(),
        shadow_map_size: cli.shadow_map_size,
    };
    if !config.assets.is_dir() {
        log::warn!(
            "asset directory {} not found; scenes will use generated textures",
            config.assets.display()
        );
    }

    log::info!("starting with scene {}", cli.scene);
    let runtime = RuntimeConfig {
        title: "atelier".to_string(),
        initial_size: LogicalSize::new(f64::from(cli.width), f64::from(cli.height)),
    };
    let gpu = GpuInit::default().with_texture_dimension(cli.shadow_map_size);
    Runtime::run(runtime, gpu, SceneHost::new(config, cli.scene))
}

fn snapshot(path: &Path, width: u32, height: u32) -> Result<()> {
    log::info!("tracing a {width}x{height} snapshot");
    let image = render_image(width, height, &TraceSettings::default());
    image
        .save(path)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_exercises() {
        let cli = Cli::parse_from(["atelier"]);
        assert_eq!(cli.scene, SceneKind::Landscape);
        assert_eq!((cli.width, cli.height), (800, 800));
        assert_eq!(cli.shadow_map_size, 4096);
        assert!(cli.snapshot.is_none());
    }

    #[test]
    fn scene_and_snapshot_parse() {
        let cli = Cli::parse_from(["atelier", "--scene", "Raytrace", "--snapshot", "out.png", "--width", "64"]);
        assert_eq!(cli.scene, SceneKind::Raytrace);
        assert_eq!(cli.snapshot, Some(PathBuf::from("out.png")));
        assert_eq!(cli.width, 64);
    }

    #[test]
    fn unknown_scene_is_rejected() {
        assert!(Cli::try_parse_from(["atelier", "--scene", "teapot"]).is_err());
    }
}
