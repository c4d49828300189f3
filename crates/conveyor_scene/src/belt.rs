//! Belt dimensions and the belt-local frame of reference.
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of the belt's transform in the materialized scene.
///
/// Every generated item stores this handle instead of a scene-graph parent
/// edge: a single belt-offset update applied under this id repositions all
/// items by composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeltTransformId(pub u32);

impl BeltTransformId {
    pub const ROOT: BeltTransformId = BeltTransformId(0);
}

/// Physical dimensions of the conveyor belt, all in meters.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeltSpec {
    /// Extent along the travel axis.
    pub length: f32,
    /// Extent across the travel axis.
    pub width: f32,
    /// Belt slab thickness; items sit on top of it.
    pub thickness: f32,
    /// Advance per animation frame along the travel axis.
    pub step_size: f32,
}

impl BeltSpec {
    pub fn new(length: f32, width: f32, thickness: f32, step_size: f32) -> Self {
        Self {
            length,
            width,
            thickness,
            step_size,
        }
    }

    /// Surface area of the belt in square meters.
    pub fn area(&self) -> f32 {
        self.length * self.width
    }

    /// Half extents `(length / 2, width / 2)` of the belt-local domain.
    pub fn half_extents(&self) -> (f32, f32) {
        (self.length / 2.0, self.width / 2.0)
    }

    /// Validates the dimensions, returning an error if any is unusable.
    pub fn validate(&self) -> Result<()> {
        if self.length <= 0.0 {
            return Err(Error::invalid_geometry("belt length", self.length));
        }
        if self.width <= 0.0 {
            return Err(Error::invalid_geometry("belt width", self.width));
        }
        if self.thickness <= 0.0 {
            return Err(Error::invalid_geometry("belt thickness", self.thickness));
        }
        if self.step_size <= 0.0 {
            return Err(Error::invalid_geometry("belt step size", self.step_size));
        }
        if self.step_size > self.length {
            return Err(Error::invalid_geometry(
                "belt step size (exceeds length)",
                self.step_size,
            ));
        }
        Ok(())
    }
}
