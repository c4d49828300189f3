//! Camera geometry planning: frame the belt correctly from above.
//!
//! The camera sits on the belt's vertical axis and looks straight down.
//! Its field of view is derived in closed form so the belt width exactly
//! fills one sensor axis: the horizontal axis in the default mode, or the
//! vertical axis when `axis_swap` maps the sensor portrait-style onto the
//! belt.
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::belt::BeltSpec;
use crate::error::{Error, Result};
use crate::geom::{fov_for_extent, paired_fov};

/// Inputs for [`CameraPlan::plan`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    /// Camera height above the belt plane, meters.
    pub height: f32,
    /// Height of the look-at point, meters.
    pub look_at_height: f32,
    /// Output resolution in pixels (width, height).
    pub resolution: (u32, u32),
    /// Map the sensor's vertical axis onto the belt width.
    pub axis_swap: bool,
}

impl CameraParams {
    pub fn new(height: f32, resolution: (u32, u32)) -> Self {
        Self {
            height,
            look_at_height: 0.0,
            resolution,
            axis_swap: false,
        }
    }

    pub fn with_look_at_height(mut self, look_at_height: f32) -> Self {
        self.look_at_height = look_at_height;
        self
    }

    pub fn with_axis_swap(mut self, axis_swap: bool) -> Self {
        self.axis_swap = axis_swap;
        self
    }
}

/// Camera pose and optics derived from belt dimensions.
///
/// The stored field of view is always the vertical one; that is the
/// convention the external materializer consumes. The realized viewing-area
/// extents are reported for diagnostics.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPlan {
    pub height: f32,
    pub look_at_height: f32,
    /// Vertical field of view in radians.
    pub vertical_fov: f32,
    pub resolution: (u32, u32),
    pub axis_swap: bool,
    /// Viewing-area extent along the sensor's horizontal axis, meters.
    pub view_width: f32,
    /// Viewing-area extent along the sensor's vertical axis, meters.
    pub view_height: f32,
}

impl CameraPlan {
    /// Compute the camera plan for the given belt and parameters.
    pub fn plan(belt: &BeltSpec, params: &CameraParams) -> Result<CameraPlan> {
        belt.validate()?;
        if params.resolution.0 == 0 || params.resolution.1 == 0 {
            return Err(Error::InvalidConfig(format!(
                "camera resolution must be non-zero, got {}x{}",
                params.resolution.0, params.resolution.1
            )));
        }

        let distance = params.height - params.look_at_height;
        if distance <= 0.0 {
            return Err(Error::invalid_geometry("camera distance", distance));
        }

        let aspect = params.resolution.0 as f32 / params.resolution.1 as f32;
        let (vertical_fov, view_width, view_height) = if params.axis_swap {
            // Sensor vertical axis spans the belt width.
            let vertical_fov = fov_for_extent(belt.width, distance);
            (vertical_fov, belt.width * aspect, belt.width)
        } else {
            let horizontal_fov = fov_for_extent(belt.width, distance);
            let vertical_fov = paired_fov(horizontal_fov, aspect, false);
            (vertical_fov, belt.width, belt.width / aspect)
        };

        let plan = CameraPlan {
            height: params.height,
            look_at_height: params.look_at_height,
            vertical_fov,
            resolution: params.resolution,
            axis_swap: params.axis_swap,
            view_width,
            view_height,
        };

        info!(
            "Camera at (0, 0, {:.2}m): viewing area {:.3}m x {:.3}m, vertical FOV {:.2} deg, {}x{}px.",
            plan.height,
            plan.view_width,
            plan.view_height,
            plan.vertical_fov.to_degrees(),
            plan.resolution.0,
            plan.resolution.1
        );

        Ok(plan)
    }

    /// Horizontal field of view in radians, derived from the stored
    /// vertical one.
    pub fn horizontal_fov(&self) -> f32 {
        let aspect = self.resolution.0 as f32 / self.resolution.1 as f32;
        paired_fov(self.vertical_fov, aspect, true)
    }

    /// Sensor aspect ratio (width over height).
    pub fn aspect(&self) -> f32 {
        self.resolution.0 as f32 / self.resolution.1 as f32
    }
}
