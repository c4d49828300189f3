//! In-memory scene materializer.
//!
//! Accumulates the scene description instead of driving a host
//! application. The diagnostic renderer reads from it, and `--no-render`
//! runs stop here entirely.
use conveyor_scene::assets::AssetSpec;
use conveyor_scene::belt::{BeltSpec, BeltTransformId};
use conveyor_scene::camera::CameraPlan;
use conveyor_scene::capability::{HostVersion, MaterialParamSet};
use conveyor_scene::error::Result;
use conveyor_scene::layout::{ItemPlacement, Rgba};
use conveyor_scene::lighting::LightPlan;
use conveyor_scene::scene::SceneMaterializer;

/// Materializer that records everything it is handed.
///
/// Item materials are resolved against the configured host version's
/// capability table on the way in, the same way a real host integration
/// would assign shader inputs.
#[derive(Debug)]
pub struct RecordingMaterializer {
    host_version: HostVersion,
    belt: Option<(BeltSpec, Rgba)>,
    items: Vec<ItemPlacement>,
    material_params: Vec<MaterialParamSet>,
    camera: Option<CameraPlan>,
    lights: Vec<LightPlan>,
    assets: Vec<AssetSpec>,
    belt_offset: f32,
}

impl Default for RecordingMaterializer {
    fn default() -> Self {
        Self {
            host_version: HostVersion::new(4, 1),
            belt: None,
            items: Vec::new(),
            material_params: Vec::new(),
            camera: None,
            lights: Vec::new(),
            assets: Vec::new(),
            belt_offset: 0.0,
        }
    }
}

impl RecordingMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host_version(mut self, host_version: HostVersion) -> Self {
        self.host_version = host_version;
        self
    }

    /// Resolved material parameter sets, one per recorded item.
    pub fn material_params(&self) -> &[MaterialParamSet] {
        &self.material_params
    }

    pub fn belt(&self) -> Option<&(BeltSpec, Rgba)> {
        self.belt.as_ref()
    }

    pub fn items(&self) -> &[ItemPlacement] {
        &self.items
    }

    pub fn camera(&self) -> Option<&CameraPlan> {
        self.camera.as_ref()
    }

    pub fn lights(&self) -> &[LightPlan] {
        &self.lights
    }

    pub fn assets(&self) -> &[AssetSpec] {
        &self.assets
    }

    /// Current belt offset along the travel axis.
    pub fn belt_offset(&self) -> f32 {
        self.belt_offset
    }
}

impl SceneMaterializer for RecordingMaterializer {
    fn add_belt(&mut self, belt: &BeltSpec, color: Rgba) -> Result<BeltTransformId> {
        self.belt = Some((*belt, color));
        Ok(BeltTransformId(1))
    }

    fn add_item(&mut self, item: &ItemPlacement) -> Result<()> {
        self.material_params.push(MaterialParamSet::resolve(
            &item.material,
            item.density,
            self.host_version,
        ));
        self.items.push(item.clone());
        Ok(())
    }

    fn set_camera(&mut self, plan: &CameraPlan) -> Result<()> {
        self.camera = Some(*plan);
        Ok(())
    }

    fn add_light(&mut self, plan: &LightPlan) -> Result<()> {
        self.lights.push(*plan);
        Ok(())
    }

    fn add_asset(&mut self, spec: &AssetSpec) -> Result<()> {
        self.assets.push(spec.clone());
        Ok(())
    }

    fn set_belt_offset(&mut self, _belt: BeltTransformId, offset: f32) -> Result<()> {
        self.belt_offset = offset;
        Ok(())
    }
}
