//! Population policy describing how many items to place and how to dress them.
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::material::MaterialProfile;

/// How the item count for a run is determined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CountPolicy {
    /// Uniform integer draw from `[min, max]` inclusive.
    Range { min: u32, max: u32 },
    /// `max(1, round(area * per_area * f))` with `f ~ U[1 - variance, 1 + variance]`.
    SpatialDensity { per_area: f32, variance: f32 },
}

/// How each item's material is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialSelection {
    /// Uniform draw over the configured catalog.
    Catalog,
    /// Procedural bright color per item, ignoring the catalog.
    SyntheticColor,
}

/// Policy for populating the belt surface with item instances.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPopulationPolicy {
    /// Edge length of each (cubic) item in meters.
    pub size: f32,
    pub count: CountPolicy,
    /// Seed for the generation stream; `None` means non-reproducible.
    pub seed: Option<u64>,
    /// Per-item elevation increment preventing coplanar surfaces.
    pub z_layer_offset: f32,
    pub density_min: f32,
    pub density_max: f32,
    /// Shell thickness of hollow items, passed through to the materializer.
    pub wall_thickness: f32,
    pub materials: Vec<MaterialProfile>,
    pub selection: MaterialSelection,
}

impl ItemPopulationPolicy {
    pub fn new(size: f32, count: CountPolicy) -> Self {
        Self {
            size,
            count,
            seed: None,
            z_layer_offset: 1e-4,
            density_min: 0.0,
            density_max: 1.0,
            wall_thickness: 0.0,
            materials: Vec::new(),
            selection: MaterialSelection::SyntheticColor,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_z_layer_offset(mut self, z_layer_offset: f32) -> Self {
        self.z_layer_offset = z_layer_offset;
        self
    }

    pub fn with_density_range(mut self, min: f32, max: f32) -> Self {
        self.density_min = min;
        self.density_max = max;
        self
    }

    pub fn with_wall_thickness(mut self, wall_thickness: f32) -> Self {
        self.wall_thickness = wall_thickness;
        self
    }

    /// Use the given catalog with uniform-random selection.
    pub fn with_catalog(mut self, materials: Vec<MaterialProfile>) -> Self {
        self.materials = materials;
        self.selection = MaterialSelection::Catalog;
        self
    }

    pub fn with_selection(mut self, selection: MaterialSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Validates the policy, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.size <= 0.0 {
            return Err(Error::invalid_geometry("item size", self.size));
        }
        if self.z_layer_offset <= 0.0 {
            return Err(Error::invalid_geometry(
                "z_layer_offset",
                self.z_layer_offset,
            ));
        }
        match self.count {
            CountPolicy::Range { min, max } => {
                if min > max {
                    return Err(Error::InvalidConfig(format!(
                        "item count range is inverted: min {min} > max {max}"
                    )));
                }
            }
            CountPolicy::SpatialDensity { per_area, variance } => {
                if per_area <= 0.0 {
                    return Err(Error::invalid_geometry("spatial density", per_area));
                }
                if !(0.0..=1.0).contains(&variance) {
                    return Err(Error::InvalidConfig(format!(
                        "spatial density variance must be in [0, 1], got {variance}"
                    )));
                }
            }
        }
        if !(0.0..=1.0).contains(&self.density_min)
            || !(0.0..=1.0).contains(&self.density_max)
            || self.density_min > self.density_max
        {
            return Err(Error::InvalidConfig(format!(
                "density range [{}, {}] must be within [0, 1] and ordered",
                self.density_min, self.density_max
            )));
        }
        if self.selection == MaterialSelection::Catalog {
            if self.materials.is_empty() {
                return Err(Error::InvalidConfig(
                    "catalog selection requires at least one material profile".into(),
                ));
            }
            for profile in &self.materials {
                profile.validate()?;
            }
        }
        Ok(())
    }
}
