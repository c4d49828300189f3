//! Declarative catalog of extra scene assets.
//!
//! Assets are auxiliary objects placed alongside the generated scene
//! (imported models, primitives, markers). A missing asset file is never
//! fatal: the entry is skipped with a warning and the run continues.
use std::path::PathBuf;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::layout::material::Rgba;
use crate::scene::SceneMaterializer;

/// What kind of object an asset entry materializes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Imported from an external model file; requires `path`.
    Model,
    Mesh,
    Sphere,
    Cylinder,
    Empty,
}

/// Optional surface overrides applied after materialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AssetProperties {
    #[serde(default)]
    pub material_color: Option<Rgba>,
    #[serde(default)]
    pub roughness: Option<f32>,
}

/// One asset entry from the catalog.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSpec {
    pub name: String,
    pub kind: AssetKind,
    /// Source file for [`AssetKind::Model`] entries.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub location: Vec3,
    /// Euler rotation in radians.
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    #[serde(default)]
    pub properties: AssetProperties,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

fn default_enabled() -> bool {
    true
}

impl AssetSpec {
    pub fn new(name: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            path: None,
            location: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            properties: AssetProperties::default(),
            enabled: true,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_location(mut self, location: Vec3) -> Self {
        self.location = location;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Load all enabled catalog entries into the materializer.
///
/// Entries whose source file is missing, and entries the materializer
/// rejects as not found, are skipped with a warning. Other materializer
/// errors propagate. Returns the names of the assets that loaded.
pub fn load_assets(
    specs: &[AssetSpec],
    materializer: &mut dyn SceneMaterializer,
) -> Result<Vec<String>> {
    let mut loaded = Vec::new();

    for spec in specs {
        if !spec.enabled {
            continue;
        }

        if spec.kind == AssetKind::Model {
            match &spec.path {
                Some(path) if !path.exists() => {
                    warn!(
                        "Asset '{}' file not found at {}; skipping.",
                        spec.name,
                        path.display()
                    );
                    continue;
                }
                None => {
                    warn!("Asset '{}' is a model without a path; skipping.", spec.name);
                    continue;
                }
                _ => {}
            }
        }

        match materializer.add_asset(spec) {
            Ok(()) => {
                info!("Loaded asset '{}'.", spec.name);
                loaded.push(spec.name.clone());
            }
            Err(Error::AssetNotFound { name }) => {
                warn!("Asset '{name}' not found in host scene; skipping.");
            }
            Err(other) => return Err(other),
        }
    }

    Ok(loaded)
}
