//! Scene orchestration and the materializer seam.
//!
//! The core never touches a host scene graph directly. Everything it needs
//! from the external scene builder is expressed through the
//! [`SceneMaterializer`] trait, and [`build_scene`] drives the stages in
//! order: belt, items, camera, lights, assets.
use tracing::info;

use crate::assets::{load_assets, AssetSpec};
use crate::belt::{BeltSpec, BeltTransformId};
use crate::camera::{CameraParams, CameraPlan};
use crate::error::Result;
use crate::layout::material::Rgba;
use crate::layout::{self, ItemPlacement, ItemPopulationPolicy};
use crate::lighting::{LightParams, LightPlan, LightRig};

/// The surface the core requires from the external scene builder.
///
/// Implementations own the host scene state. `set_belt_offset` is the
/// single mutation applied per animation frame; item world positions derive
/// from it by composition through their stored [`BeltTransformId`].
pub trait SceneMaterializer {
    fn add_belt(&mut self, belt: &BeltSpec, color: Rgba) -> Result<BeltTransformId>;
    fn add_item(&mut self, item: &ItemPlacement) -> Result<()>;
    fn set_camera(&mut self, plan: &CameraPlan) -> Result<()>;
    fn add_light(&mut self, plan: &LightPlan) -> Result<()>;
    fn add_asset(&mut self, spec: &AssetSpec) -> Result<()>;
    fn set_belt_offset(&mut self, belt: BeltTransformId, offset: f32) -> Result<()>;
}

/// Everything needed to build one scene.
#[derive(Debug, Clone)]
pub struct SceneBuildRequest {
    pub belt: BeltSpec,
    pub belt_color: Rgba,
    pub policy: ItemPopulationPolicy,
    pub camera: CameraParams,
    pub lighting: LightParams,
    pub assets: Vec<AssetSpec>,
}

/// What one build produced, handed back to the caller read-only.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub belt_id: BeltTransformId,
    pub placements: Vec<ItemPlacement>,
    pub camera: CameraPlan,
    pub lights: LightRig,
    pub assets_loaded: Vec<String>,
}

/// Build the full scene through the materializer.
///
/// Derivations (layout, camera, lights) happen first, so configuration and
/// geometry errors surface before the host scene is touched beyond the
/// belt itself.
pub fn build_scene(
    request: &SceneBuildRequest,
    materializer: &mut dyn SceneMaterializer,
) -> Result<SceneSummary> {
    request.belt.validate()?;
    request.policy.validate()?;

    info!("Building scene: belt.");
    let belt_id = materializer.add_belt(&request.belt, request.belt_color)?;

    info!("Building scene: items.");
    let mut placements = layout::generate(&request.belt, &request.policy)?;
    for placement in &mut placements {
        placement.belt = belt_id;
        materializer.add_item(placement)?;
    }

    info!("Building scene: camera.");
    let camera = CameraPlan::plan(&request.belt, &request.camera)?;
    materializer.set_camera(&camera)?;

    info!("Building scene: lights.");
    let lights = LightRig::plan(&request.belt, &request.lighting)?;
    materializer.add_light(&lights.primary)?;
    materializer.add_light(&lights.fill)?;

    info!("Building scene: assets.");
    let assets_loaded = load_assets(&request.assets, materializer)?;

    info!(
        "Scene complete: {} item(s), {} asset(s).",
        placements.len(),
        assets_loaded.len()
    );

    Ok(SceneSummary {
        belt_id,
        placements,
        camera,
        lights,
        assets_loaded,
    })
}
