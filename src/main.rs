//! Replay a recorded interaction against the live-view canvas.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use liveview_annotate::{
    replay, AnnoList, AppConfig, InferenceSettings, LiveViewScene, ReplayError, ReplayScript,
    VideoAnnoStore,
};
use liveview_scene::{frame_from_rgba8, render_stage, Size};

#[derive(Parser, Debug)]
#[command(name = "liveview-annotate", version)]
#[command(about = "Replay a recorded interaction script against the live-view annotation canvas")]
struct Args {
    /// Replay script (JSON)
    script: PathBuf,
    /// Annotations to start from instead of an empty collection
    #[arg(long, value_name = "PATH")]
    annotations: Option<PathBuf>,
    /// Where to write the resulting annotations
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,
    /// Also write the inference settings derived from the annotations
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
    /// Render the final scene to a PNG
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,
    /// Background frame for the snapshot
    #[arg(long, value_name = "PATH", requires = "snapshot")]
    frame: Option<PathBuf>,
    /// Configuration file, defaults to the user config directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig, ReplayError> {
    match path {
        Some(path) => Ok(AppConfig::load(path)?),
        None => Ok(AppConfig::load_from_default_path().unwrap_or_default()),
    }
}

fn run(args: &Args, config: AppConfig) -> Result<(), ReplayError> {
    let script = ReplayScript::load(&args.script)?;
    let mut store = match &args.annotations {
        Some(path) => AnnoList::load(path)?,
        None => AnnoList::new(),
    };

    let mut scene = LiveViewScene::new(config.scene);
    let summary = replay::run(&mut scene, &mut store, &script);
    log::info!(
        "Replayed {} steps: {} committed, {} removed, {} discarded",
        script.steps.len(),
        summary.committed.len(),
        summary.removed.len(),
        summary.discarded
    );

    if let Some(path) = &args.snapshot {
        let stage = scene.render(&store);
        let frame = match &args.frame {
            Some(frame_path) => {
                let rgba = image::open(frame_path)?.to_rgba8();
                let (width, height) = rgba.dimensions();
                if Size::new(width as f32, height as f32) != script.image {
                    log::warn!(
                        "Frame {:?} is {}x{}, script expects {}x{}",
                        frame_path,
                        width,
                        height,
                        script.image.width,
                        script.image.height
                    );
                }
                Some(frame_from_rgba8(rgba.into_raw(), width, height)?)
            }
            None => None,
        };
        let pixmap = render_stage(&stage, frame.as_ref())?;
        let snapshot = image::RgbaImage::from_raw(
            pixmap.width(),
            pixmap.height(),
            liveview_scene::pixmap_to_rgba8(&pixmap),
        )
        .ok_or_else(|| std::io::Error::other("snapshot buffer size mismatch"))?;
        snapshot.save(path)?;
        log::info!("Saved snapshot to {:?}", path);
    }
    scene.teardown();

    store.save(&args.output)?;
    if let Some(path) = &args.export {
        InferenceSettings::from_annos(store.video_annos(), script.image).save(path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // RUST_LOG still wins over the configured level
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    if let Err(e) = run(&args, config) {
        eprintln!("Replay error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
