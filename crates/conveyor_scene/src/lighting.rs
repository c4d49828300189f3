//! Light geometry planning: a primary strip light plus a weaker fill.
//!
//! The primary light is a rectangular strip hung off to the side of the
//! belt, perpendicular to the travel direction, at a configurable incidence
//! angle. A fixed weak fill light on the opposite side softens shadows.
//! Both aim at the same look-at point just above the belt surface.
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::belt::BeltSpec;
use crate::error::{Error, Result};
use crate::geom::offset_at_angle;

/// Height of the shared look-at point above the belt plane.
const TARGET_HEIGHT: f32 = 0.05;

/// Fixed fill light placement and energy; deliberately not belt-scaled.
const FILL_POSITION: Vec3 = Vec3::new(0.8, 0.0, 0.8);
const FILL_ENERGY: f32 = 20.0;
const FILL_STRIP_DEPTH: f32 = 0.3;

/// Inputs for [`LightRig::plan`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightParams {
    /// Incidence angle above the horizontal, degrees.
    pub angle_deg: f32,
    /// Standoff distance from the belt center, meters.
    pub distance: f32,
    /// Primary light energy in watts.
    pub energy: f32,
    /// Depth of the light strip along the travel axis, meters.
    pub strip_depth: f32,
}

impl LightParams {
    pub fn new(angle_deg: f32, distance: f32, energy: f32) -> Self {
        Self {
            angle_deg,
            distance,
            energy,
            strip_depth: 0.2,
        }
    }

    pub fn with_strip_depth(mut self, strip_depth: f32) -> Self {
        self.strip_depth = strip_depth;
        self
    }
}

/// Pose and footprint of one rectangular area light.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightPlan {
    pub position: Vec3,
    /// Point the light is oriented towards.
    pub target: Vec3,
    /// Incidence angle above the horizontal, degrees.
    pub angle_deg: f32,
    pub energy: f32,
    /// Footprint extent across the belt (strip length), meters.
    pub size: f32,
    /// Footprint extent along the travel axis (strip depth), meters.
    pub size_y: f32,
}

/// The full lighting setup for one run: primary strip plus fill.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightRig {
    pub primary: LightPlan,
    pub fill: LightPlan,
}

impl LightRig {
    /// Compute primary and fill light placement for the given belt.
    pub fn plan(belt: &BeltSpec, params: &LightParams) -> Result<LightRig> {
        belt.validate()?;
        if params.distance <= 0.0 {
            return Err(Error::invalid_geometry("light distance", params.distance));
        }
        if params.energy <= 0.0 {
            return Err(Error::invalid_geometry("light energy", params.energy));
        }
        if params.strip_depth <= 0.0 {
            return Err(Error::invalid_geometry(
                "light strip depth",
                params.strip_depth,
            ));
        }

        // Offset perpendicular to the travel axis, raised by the incidence
        // angle.
        let (reach, height) = offset_at_angle(params.angle_deg, params.distance);
        let target = Vec3::new(0.0, 0.0, TARGET_HEIGHT);

        let primary = LightPlan {
            position: Vec3::new(-reach, 0.0, height),
            target,
            angle_deg: params.angle_deg,
            energy: params.energy,
            // Strip spans the belt cross-section.
            size: belt.width * 0.9,
            size_y: params.strip_depth,
        };

        // Opposite side, much weaker, same look-at point.
        let fill = LightPlan {
            position: FILL_POSITION,
            target,
            angle_deg: 45.0,
            energy: FILL_ENERGY,
            size: belt.width * 0.7,
            size_y: FILL_STRIP_DEPTH,
        };

        info!(
            "Primary light at ({:.2}, {:.2}, {:.2}), {:.0}W, strip {:.2}m x {:.2}m; fill at ({:.2}, {:.2}, {:.2}), {:.0}W.",
            primary.position.x,
            primary.position.y,
            primary.position.z,
            primary.energy,
            primary.size,
            primary.size_y,
            fill.position.x,
            fill.position.y,
            fill.position.z,
            fill.energy
        );

        Ok(LightRig { primary, fill })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn belt() -> BeltSpec {
        BeltSpec::new(2.0, 0.6, 0.1, 0.05)
    }

    #[test]
    fn primary_position_follows_incidence_angle() {
        let rig = LightRig::plan(&belt(), &LightParams::new(45.0, 1.0, 300.0)).unwrap();
        let expected = std::f32::consts::FRAC_1_SQRT_2;
        assert!((rig.primary.position.x + expected).abs() < 1e-6);
        assert_eq!(rig.primary.position.y, 0.0);
        assert!((rig.primary.position.z - expected).abs() < 1e-6);
    }

    #[test]
    fn vertical_incidence_sits_directly_above() {
        let rig = LightRig::plan(&belt(), &LightParams::new(90.0, 2.0, 300.0)).unwrap();
        assert!(rig.primary.position.x.abs() < 1e-6);
        assert!((rig.primary.position.z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn footprints_scale_with_belt_width() {
        let rig = LightRig::plan(&belt(), &LightParams::new(45.0, 1.0, 300.0)).unwrap();
        assert!((rig.primary.size - 0.54).abs() < 1e-6);
        assert_eq!(rig.primary.size_y, 0.2);
        assert!((rig.fill.size - 0.42).abs() < 1e-6);
    }

    #[test]
    fn fill_is_weak_and_shares_the_target() {
        let rig = LightRig::plan(&belt(), &LightParams::new(45.0, 1.0, 300.0)).unwrap();
        assert!(rig.fill.energy < rig.primary.energy);
        assert_eq!(rig.fill.energy, 20.0);
        assert_eq!(rig.fill.target, rig.primary.target);
        assert_eq!(rig.primary.target.z, 0.05);
        // Opposite side of the belt from the primary.
        assert!(rig.fill.position.x * rig.primary.position.x < 0.0);
    }

    #[test]
    fn configured_strip_depth_is_honored() {
        let params = LightParams::new(45.0, 1.0, 300.0).with_strip_depth(0.35);
        let rig = LightRig::plan(&belt(), &params).unwrap();
        assert_eq!(rig.primary.size_y, 0.35);
    }

    #[test]
    fn invalid_standoff_is_rejected() {
        assert!(matches!(
            LightRig::plan(&belt(), &LightParams::new(45.0, 0.0, 300.0)),
            Err(Error::InvalidGeometry { .. })
        ));
        assert!(matches!(
            LightRig::plan(&belt(), &LightParams::new(45.0, 1.0, -5.0)),
            Err(Error::InvalidGeometry { .. })
        ));
    }
}
