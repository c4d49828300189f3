//! Structured configuration document and its mapping onto typed inputs.
//!
//! The config is a JSON document with `conveyor`, `boxes`, `camera`,
//! `lighting`, and `render` sections (plus an optional `assets` catalog).
//! Missing or malformed required fields are fatal before any scene work.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::AssetSpec;
use crate::belt::BeltSpec;
use crate::camera::CameraParams;
use crate::error::{Error, Result};
use crate::layout::material::{MaterialProfile, Rgba};
use crate::layout::policy::{CountPolicy, ItemPopulationPolicy, MaterialSelection};
use crate::lighting::LightParams;
use crate::render::{OutputFormat, RenderJob};
use crate::scene::SceneBuildRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConveyorConfig {
    pub length: f32,
    pub width: f32,
    pub thickness: f32,
    pub step_size: f32,
    #[serde(default = "default_belt_color")]
    pub material_color: [f32; 4],
}

fn default_belt_color() -> [f32; 4] {
    [0.2, 0.2, 0.2, 1.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxesConfig {
    pub size: f32,
    #[serde(default = "default_min_count")]
    pub min_count: u32,
    #[serde(default = "default_max_count")]
    pub max_count: u32,
    #[serde(default)]
    pub random_seed: Option<u64>,
    #[serde(default = "default_true")]
    pub random_colors: bool,
    #[serde(default = "default_z_layer_offset")]
    pub z_layer_offset: f32,
    #[serde(default)]
    pub density_min: f32,
    #[serde(default = "default_density_max")]
    pub density_max: f32,
    #[serde(default)]
    pub wall_thickness: f32,
    #[serde(default)]
    pub material_types: Vec<MaterialProfile>,
    #[serde(default)]
    pub use_spatial_density: bool,
    #[serde(default)]
    pub spatial_density: f32,
    #[serde(default)]
    pub spatial_density_variance: f32,
}

fn default_min_count() -> u32 {
    1
}

fn default_max_count() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_z_layer_offset() -> f32 {
    1e-4
}

fn default_density_max() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub height: f32,
    pub resolution_x: u32,
    pub resolution_y: u32,
    #[serde(default)]
    pub look_at_height: f32,
    #[serde(default)]
    pub axis_swap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    pub angle_degrees: f32,
    pub distance_from_conveyor: f32,
    pub strength: f32,
    #[serde(default = "default_strip_depth")]
    pub size: f32,
}

fn default_strip_depth() -> f32 {
    0.2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_engine")]
    pub engine: String,
    #[serde(default = "default_samples")]
    pub samples: u32,
    #[serde(default = "default_true")]
    pub use_denoising: bool,
    #[serde(default)]
    pub file_format: OutputFormat,
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,
}

fn default_engine() -> String {
    "CYCLES".to_owned()
}

fn default_samples() -> u32 {
    64
}

fn default_output_folder() -> PathBuf {
    PathBuf::from("renders")
}

/// The full configuration document for one generation run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub conveyor: ConveyorConfig,
    pub boxes: BoxesConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub render: RenderConfig,
    #[serde(default)]
    pub assets: Vec<AssetSpec>,
}

impl Config {
    /// Parse a config from JSON text.
    pub fn from_json_str(text: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(text)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and parse a config file.
    pub fn from_path(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Validate all derived inputs up front, before any scene work.
    pub fn validate(&self) -> Result<()> {
        self.belt_spec().validate()?;
        self.population_policy().validate()?;
        if self.lighting.distance_from_conveyor <= 0.0 {
            return Err(Error::invalid_geometry(
                "light distance",
                self.lighting.distance_from_conveyor,
            ));
        }
        Ok(())
    }

    pub fn belt_spec(&self) -> BeltSpec {
        BeltSpec::new(
            self.conveyor.length,
            self.conveyor.width,
            self.conveyor.thickness,
            self.conveyor.step_size,
        )
    }

    pub fn population_policy(&self) -> ItemPopulationPolicy {
        let count = if self.boxes.use_spatial_density {
            CountPolicy::SpatialDensity {
                per_area: self.boxes.spatial_density,
                variance: self.boxes.spatial_density_variance,
            }
        } else {
            CountPolicy::Range {
                min: self.boxes.min_count,
                max: self.boxes.max_count,
            }
        };

        let mut policy = ItemPopulationPolicy::new(self.boxes.size, count)
            .with_z_layer_offset(self.boxes.z_layer_offset)
            .with_density_range(self.boxes.density_min, self.boxes.density_max)
            .with_wall_thickness(self.boxes.wall_thickness);

        if let Some(seed) = self.boxes.random_seed {
            policy = policy.with_seed(seed);
        }

        policy = if self.boxes.random_colors {
            policy.with_selection(MaterialSelection::SyntheticColor)
        } else if self.boxes.material_types.is_empty() {
            // No catalog configured: every item gets the default red.
            policy.with_catalog(vec![MaterialProfile::new(
                "default",
                Rgba::new(0.8, 0.2, 0.2, 1.0),
            )])
        } else {
            policy.with_catalog(self.boxes.material_types.clone())
        };

        policy
    }

    pub fn camera_params(&self) -> CameraParams {
        CameraParams::new(
            self.camera.height,
            (self.camera.resolution_x, self.camera.resolution_y),
        )
        .with_look_at_height(self.camera.look_at_height)
        .with_axis_swap(self.camera.axis_swap)
    }

    pub fn light_params(&self) -> LightParams {
        LightParams::new(
            self.lighting.angle_degrees,
            self.lighting.distance_from_conveyor,
            self.lighting.strength,
        )
        .with_strip_depth(self.lighting.size)
    }

    pub fn render_job(&self) -> RenderJob {
        RenderJob::new(self.render.output_folder.clone()).with_format(self.render.file_format)
    }

    pub fn scene_request(&self) -> SceneBuildRequest {
        SceneBuildRequest {
            belt: self.belt_spec(),
            belt_color: Rgba::from(self.conveyor.material_color),
            policy: self.population_policy(),
            camera: self.camera_params(),
            lighting: self.light_params(),
            assets: self.assets.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "conveyor": {"length": 1.0, "width": 0.6, "thickness": 0.1, "step_size": 0.1},
        "boxes": {"size": 0.08, "min_count": 5, "max_count": 15, "random_seed": 42},
        "camera": {"height": 1.0, "resolution_x": 640, "resolution_y": 480},
        "lighting": {"angle_degrees": 45.0, "distance_from_conveyor": 1.0, "strength": 300.0},
        "render": {}
    }"#;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config = Config::from_json_str(MINIMAL).unwrap();
        assert_eq!(config.render.engine, "CYCLES");
        assert_eq!(config.render.samples, 64);
        assert_eq!(config.render.file_format, OutputFormat::Png);
        assert_eq!(config.render.output_folder, PathBuf::from("renders"));
        assert!(config.boxes.random_colors);
        assert_eq!(config.boxes.z_layer_offset, 1e-4);
        assert!(config.assets.is_empty());
    }

    #[test]
    fn missing_section_is_invalid_config() {
        let err = Config::from_json_str(r#"{"conveyor": {}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn policy_maps_count_mode_from_flags() {
        let config = Config::from_json_str(MINIMAL).unwrap();
        let policy = config.population_policy();
        assert_eq!(policy.count, CountPolicy::Range { min: 5, max: 15 });
        assert_eq!(policy.seed, Some(42));
        assert_eq!(policy.selection, MaterialSelection::SyntheticColor);

        let spatial = MINIMAL.replace(
            r#""random_seed": 42"#,
            r#""random_seed": 42, "use_spatial_density": true, "spatial_density": 10.0"#,
        );
        let config = Config::from_json_str(&spatial).unwrap();
        assert_eq!(
            config.population_policy().count,
            CountPolicy::SpatialDensity {
                per_area: 10.0,
                variance: 0.0
            }
        );
    }

    #[test]
    fn fixed_color_mode_falls_back_to_default_red_catalog() {
        let fixed = MINIMAL.replace(
            r#""random_seed": 42"#,
            r#""random_seed": 42, "random_colors": false"#,
        );
        let config = Config::from_json_str(&fixed).unwrap();
        let policy = config.population_policy();
        assert_eq!(policy.selection, MaterialSelection::Catalog);
        assert_eq!(policy.materials.len(), 1);
        assert_eq!(policy.materials[0].base_color, Rgba::new(0.8, 0.2, 0.2, 1.0));
    }

    #[test]
    fn invalid_geometry_is_caught_at_parse_time() {
        let bad = MINIMAL.replace(r#""step_size": 0.1"#, r#""step_size": 5.0"#);
        let err = Config::from_json_str(&bad).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { .. }));
    }

    #[test]
    fn file_format_accepts_config_spelling() {
        let jpeg = MINIMAL.replace(
            r#""render": {}"#,
            r#""render": {"file_format": "JPEG", "output_folder": "out"}"#,
        );
        let config = Config::from_json_str(&jpeg).unwrap();
        assert_eq!(config.render.file_format, OutputFormat::Jpeg);
        let job = config.render_job();
        assert_eq!(job.frame_path(1), PathBuf::from("out/frame_0001.jpg"));
    }

    #[test]
    fn round_trips_through_serde() {
        let config = Config::from_json_str(MINIMAL).unwrap();
        let text = serde_json::to_string(&config).unwrap();
        let back = Config::from_json_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
