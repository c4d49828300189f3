#![forbid(unsafe_code)]
//! conveyor_scene: deterministic scene layout and render sequencing for
//! synthetic conveyor-belt vision datasets.
//!
//! Modules:
//! - layout: seeded, density-controlled item placement on the belt surface
//! - camera / lighting: closed-form pose and field-of-view planning
//! - timeline: discrete belt motion as a frame-indexed step function
//! - render: sequential dispatch against an external renderer
//! - scene: materializer seam and build orchestration
//! - config: the structured configuration document
pub mod assets;
pub mod belt;
pub mod camera;
pub mod capability;
pub mod config;
pub mod error;
pub mod geom;
pub mod layout;
pub mod lighting;
pub mod render;
pub mod scene;
pub mod timeline;

/// Convenient re-exports for common types. Import with
/// `use conveyor_scene::prelude::*;`.
pub mod prelude {
    pub use crate::assets::{AssetKind, AssetSpec};
    pub use crate::belt::{BeltSpec, BeltTransformId};
    pub use crate::camera::{CameraParams, CameraPlan};
    pub use crate::capability::{HostVersion, MaterialParamSet};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::layout::{
        generate, generate_with_rng, CountPolicy, ItemMaterial, ItemPlacement,
        ItemPopulationPolicy, MaterialProfile, MaterialSelection, Rgba,
    };
    pub use crate::lighting::{LightParams, LightPlan, LightRig};
    pub use crate::render::{
        dispatch, FrameRenderer, FrameSelection, OutputFormat, RenderJob, RenderOutcome,
    };
    pub use crate::scene::{build_scene, SceneBuildRequest, SceneMaterializer, SceneSummary};
    pub use crate::timeline::{AnimationTimeline, FrameEntry};
}
