use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use conveyor_scene::prelude::*;
use conveyor_scene_cli::{init_tracing, PngFrameRenderer, RecordingMaterializer};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "conveyor-scene", version)]
struct Cli {
    /// Configuration document.
    #[arg(long, default_value = "config/conveyor_config.json")]
    config: PathBuf,

    /// Build the scene but skip render dispatch.
    #[arg(long)]
    no_render: bool,

    /// Print the frame-to-offset timeline instead of staying silent.
    #[arg(long)]
    preview: bool,

    /// Render only these 1-based frame indices (comma separated).
    #[arg(long, value_delimiter = ',')]
    frames: Option<Vec<u32>>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::from_path(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let request = config.scene_request();
    let mut recorder = RecordingMaterializer::new();
    let summary = build_scene(&request, &mut recorder).context("building scene")?;

    let timeline = AnimationTimeline::build(&request.belt).context("building timeline")?;

    if cli.preview {
        println!("frame  belt_offset_m");
        for entry in &timeline {
            println!("{:>5}  {:>+.3}", entry.frame, entry.belt_offset);
        }
    }

    if cli.no_render {
        info!(
            "Scene ready ({} items, {} frames); skipping render dispatch.",
            summary.placements.len(),
            timeline.len()
        );
        return Ok(());
    }

    let mut job = config.render_job();
    if let Some(frames) = &cli.frames {
        job = job.with_frames(frames.clone());
    }

    let mut renderer = PngFrameRenderer::new(
        request.belt,
        request.belt_color,
        summary.placements.clone(),
        summary.camera,
    );

    let outcome = dispatch(&timeline, &job, &mut renderer).context("rendering sequence")?;

    println!(
        "Rendered {} frame(s) to {}.",
        outcome.rendered.len(),
        job.output_dir.display()
    );

    Ok(())
}
