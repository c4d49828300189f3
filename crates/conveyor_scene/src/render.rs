//! Render dispatch: walk the timeline and invoke the external renderer.
//!
//! The renderer itself is an opaque, blocking collaborator behind the
//! [`FrameRenderer`] trait. Frames are dispatched strictly sequentially in
//! ascending index order; the external renderer shares one mutable scene
//! state, so two frames are never in flight at once. A failed frame aborts
//! the remaining sequence immediately, leaving already-written files in
//! place.
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::timeline::{AnimationTimeline, FrameEntry};

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Exr,
}

impl OutputFormat {
    /// Lowercase file extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Exr => "exr",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            "exr" | "open_exr" => Ok(OutputFormat::Exr),
            other => Err(Error::InvalidConfig(format!(
                "unsupported file format '{other}'"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Which frames of the timeline a job covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FrameSelection {
    /// The whole timeline in order.
    #[default]
    All,
    /// An explicit set of 1-based frame indices.
    Frames(Vec<u32>),
}

/// One render batch: frame selection, output location, and format.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderJob {
    pub frames: FrameSelection,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

impl RenderJob {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            frames: FrameSelection::All,
            output_dir: output_dir.into(),
            format: OutputFormat::Png,
        }
    }

    pub fn with_frames(mut self, frames: Vec<u32>) -> Self {
        self.frames = FrameSelection::Frames(frames);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Output path for a 1-based frame index: `frame_NNNN.<ext>`.
    pub fn frame_path(&self, frame: u32) -> PathBuf {
        self.output_dir
            .join(format!("frame_{:04}.{}", frame, self.format.extension()))
    }
}

/// The external render collaborator.
///
/// One blocking call per frame. The implementation owns whatever mutable
/// scene state it needs; it is handed the frame's belt offset through the
/// entry and must write the image to `out_path`.
pub trait FrameRenderer {
    fn render(&mut self, entry: &FrameEntry, out_path: &Path) -> Result<()>;
}

/// Result of a completed render batch.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct RenderOutcome {
    /// Paths of the produced images, in frame order.
    pub rendered: Vec<PathBuf>,
}

/// Dispatch a render job over the timeline.
///
/// Full-sequence and subset rendering share the same per-frame procedure;
/// only the iteration set differs. Subsets are rendered in increasing index
/// order with duplicates removed, and every requested index is checked
/// against the timeline before the first render call.
pub fn dispatch(
    timeline: &AnimationTimeline,
    job: &RenderJob,
    renderer: &mut dyn FrameRenderer,
) -> Result<RenderOutcome> {
    let entries = select_entries(timeline, &job.frames)?;

    std::fs::create_dir_all(&job.output_dir)?;

    let total = entries.len();
    info!(
        "Rendering {} frame(s) to {}.",
        total,
        job.output_dir.display()
    );

    let mut rendered = Vec::with_capacity(total);
    for (i, entry) in entries.iter().enumerate() {
        let out_path = job.frame_path(entry.frame);
        info!(
            "Rendering frame {}/{} (belt offset {:.3}m).",
            i + 1,
            total,
            entry.belt_offset
        );

        if let Err(e) = renderer.render(entry, &out_path) {
            warn!(
                "Render failed at frame {}; aborting sequence, {} frame(s) kept.",
                entry.frame,
                rendered.len()
            );
            return Err(match e {
                err @ Error::Render { .. } => err,
                other => Error::Render {
                    frame: entry.frame,
                    message: other.to_string(),
                },
            });
        }
        rendered.push(out_path);
    }

    info!("Render complete: {} image(s).", rendered.len());
    Ok(RenderOutcome { rendered })
}

fn select_entries(
    timeline: &AnimationTimeline,
    selection: &FrameSelection,
) -> Result<Vec<FrameEntry>> {
    match selection {
        FrameSelection::All => Ok(timeline.iter().copied().collect()),
        FrameSelection::Frames(frames) => {
            let mut indices = frames.clone();
            indices.sort_unstable();
            indices.dedup();

            let mut entries = Vec::with_capacity(indices.len());
            for frame in indices {
                let entry = timeline.get(frame).ok_or(Error::UnknownFrame {
                    frame,
                    len: timeline.len(),
                })?;
                entries.push(*entry);
            }
            Ok(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::belt::BeltSpec;

    /// Test stand-in for the external renderer: writes a marker file per
    /// frame and can be armed to fail at a specific frame.
    struct StubRenderer {
        calls: Vec<u32>,
        fail_at: Option<u32>,
    }

    impl StubRenderer {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                fail_at: None,
            }
        }

        fn failing_at(frame: u32) -> Self {
            Self {
                calls: Vec::new(),
                fail_at: Some(frame),
            }
        }
    }

    impl FrameRenderer for StubRenderer {
        fn render(&mut self, entry: &FrameEntry, out_path: &Path) -> Result<()> {
            if self.fail_at == Some(entry.frame) {
                return Err(Error::Render {
                    frame: entry.frame,
                    message: "stub failure".into(),
                });
            }
            self.calls.push(entry.frame);
            fs::write(out_path, entry.belt_offset.to_string())?;
            Ok(())
        }
    }

    fn timeline() -> AnimationTimeline {
        AnimationTimeline::build(&BeltSpec::new(1.0, 0.6, 0.1, 0.1)).unwrap()
    }

    #[test]
    fn full_sequence_renders_every_frame_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let job = RenderJob::new(dir.path());
        let mut renderer = StubRenderer::new();

        let outcome = dispatch(&timeline(), &job, &mut renderer).unwrap();
        assert_eq!(outcome.rendered.len(), 11);
        assert_eq!(renderer.calls, (1..=11).collect::<Vec<_>>());
        assert!(dir.path().join("frame_0001.png").exists());
        assert!(dir.path().join("frame_0011.png").exists());
    }

    #[test]
    fn subset_is_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let job = RenderJob::new(dir.path()).with_frames(vec![3, 1, 3, 2]);
        let mut renderer = StubRenderer::new();

        let outcome = dispatch(&timeline(), &job, &mut renderer).unwrap();
        assert_eq!(renderer.calls, vec![1, 2, 3]);
        assert_eq!(outcome.rendered.len(), 3);
    }

    #[test]
    fn unknown_frame_fails_before_any_render() {
        let dir = tempfile::tempdir().unwrap();
        let job = RenderJob::new(dir.path()).with_frames(vec![1, 12]);
        let mut renderer = StubRenderer::new();

        let err = dispatch(&timeline(), &job, &mut renderer).unwrap_err();
        assert!(matches!(err, Error::UnknownFrame { frame: 12, len: 11 }));
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn failure_aborts_sequence_and_preserves_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let job = RenderJob::new(dir.path());
        let mut renderer = StubRenderer::failing_at(6);

        let err = dispatch(&timeline(), &job, &mut renderer).unwrap_err();
        assert!(matches!(err, Error::Render { frame: 6, .. }));

        // Frames 1-5 rendered, frames 6-11 never attempted.
        assert_eq!(renderer.calls, vec![1, 2, 3, 4, 5]);
        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 5);
    }

    #[test]
    fn filename_template_is_zero_padded() {
        let job = RenderJob::new("/tmp/out").with_format(OutputFormat::Jpeg);
        assert_eq!(
            job.frame_path(7),
            PathBuf::from("/tmp/out/frame_0007.jpg")
        );
        assert_eq!(
            job.frame_path(123),
            PathBuf::from("/tmp/out/frame_0123.jpg")
        );
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("jpeg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert!("webp".parse::<OutputFormat>().is_err());
    }
}
