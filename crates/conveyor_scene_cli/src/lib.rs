#![forbid(unsafe_code)]
//! Library side of the CLI: a recording materializer, a diagnostic PNG
//! renderer, and tracing setup. The binary in `main.rs` wires these to the
//! config document and the render dispatcher.

mod render_png;
mod scene_record;

pub use render_png::PngFrameRenderer;
pub use scene_record::RecordingMaterializer;

/// Initialize a fmt tracing subscriber for the executables.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
