//! Animation sequencing: belt motion as a discrete frame timeline.
//!
//! Continuous belt travel is converted into an ordered table of frame
//! index to belt x-offset. Transitions are a step function: each frame's
//! offset is exact and final, with no interpolation between frames.
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::belt::BeltSpec;
use crate::error::Result;

/// One frame of the timeline. Frame indices are 1-based and contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameEntry {
    pub frame: u32,
    /// Belt offset along the travel axis for this frame, meters.
    pub belt_offset: f32,
}

/// The ordered frame-to-offset mapping for one run.
///
/// Built once from the belt spec and consumed read-only by the render
/// dispatcher. Frame `i` in `[1, num_steps + 1]` maps to offset
/// `-length / 2 + (i - 1) * step_size`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTimeline {
    entries: Vec<FrameEntry>,
    step_size: f32,
}

impl AnimationTimeline {
    /// Build the timeline for the given belt.
    pub fn build(belt: &BeltSpec) -> Result<AnimationTimeline> {
        belt.validate()?;

        let num_steps = (belt.length / belt.step_size).floor() as u32;
        let start = -belt.length / 2.0;

        let entries = (0..=num_steps)
            .map(|step| FrameEntry {
                frame: step + 1,
                belt_offset: start + step as f32 * belt.step_size,
            })
            .collect::<Vec<_>>();

        info!(
            "Timeline: {} steps of {:.3}m over a {:.2}m belt, frames 1..={}.",
            num_steps,
            belt.step_size,
            belt.length,
            entries.len()
        );

        Ok(AnimationTimeline {
            entries,
            step_size: belt.step_size,
        })
    }

    /// Number of frames (`num_steps + 1`).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Belt advance between consecutive frames, meters.
    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    /// First and last frame index, inclusive.
    pub fn frame_range(&self) -> (u32, u32) {
        (1, self.entries.len() as u32)
    }

    /// Entry for a 1-based frame index, if it exists.
    pub fn get(&self, frame: u32) -> Option<&FrameEntry> {
        if frame == 0 {
            return None;
        }
        self.entries.get(frame as usize - 1)
    }

    /// Entries in ascending frame order.
    pub fn iter(&self) -> impl Iterator<Item = &FrameEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AnimationTimeline {
    type Item = &'a FrameEntry;
    type IntoIter = std::slice::Iter<'a, FrameEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
