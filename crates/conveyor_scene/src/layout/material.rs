//! Material profiles and the density-to-transmittance mapping.
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from an RGB triple.
    pub const fn opaque(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// A named surface material from the catalog.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    pub name: String,
    pub base_color: Rgba,
    pub roughness: f32,
    /// Index of refraction.
    pub ior: f32,
    /// Fraction of light passing through at zero density (0 = opaque).
    pub base_transmittance: f32,
}

impl MaterialProfile {
    pub fn new(name: impl Into<String>, base_color: Rgba) -> Self {
        Self {
            name: name.into(),
            base_color,
            roughness: 0.4,
            ior: 1.45,
            base_transmittance: 0.0,
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_ior(mut self, ior: f32) -> Self {
        self.ior = ior;
        self
    }

    pub fn with_base_transmittance(mut self, base_transmittance: f32) -> Self {
        self.base_transmittance = base_transmittance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidConfig(
                "material profile name must not be empty".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.base_transmittance) {
            return Err(Error::InvalidConfig(format!(
                "material '{}' base_transmittance must be in [0, 1]",
                self.name
            )));
        }
        Ok(())
    }
}

/// Material assigned to a single item instance.
///
/// The two variants map a per-instance density scalar to a final
/// transmittance through different formulas. This is intentional: synthetic
/// colors have no physical base value to scale, so they use the plain
/// linear complement, while catalog profiles scale their calibrated base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemMaterial {
    /// Profile drawn from the configured catalog.
    Profile(MaterialProfile),
    /// Procedurally generated color for random-color mode.
    Synthetic(Rgba),
}

impl ItemMaterial {
    /// Final transmittance for an instance of the given density in [0, 1].
    ///
    /// Higher density always means less light passes through.
    pub fn transmittance(&self, density: f32) -> f32 {
        let density = density.clamp(0.0, 1.0);
        match self {
            ItemMaterial::Synthetic(_) => 1.0 - density,
            ItemMaterial::Profile(profile) => profile.base_transmittance * (1.0 - density),
        }
    }

    /// Surface color, regardless of variant.
    pub fn base_color(&self) -> Rgba {
        match self {
            ItemMaterial::Profile(profile) => profile.base_color,
            ItemMaterial::Synthetic(color) => *color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_transmittance_is_linear_complement() {
        let mat = ItemMaterial::Synthetic(Rgba::opaque([1.0, 0.0, 0.0]));
        assert_eq!(mat.transmittance(0.0), 1.0);
        assert_eq!(mat.transmittance(1.0), 0.0);
        assert!((mat.transmittance(0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn profile_transmittance_scales_base() {
        let profile = MaterialProfile::new("glassine", Rgba::new(0.9, 0.9, 0.95, 1.0))
            .with_base_transmittance(0.8);
        let mat = ItemMaterial::Profile(profile);
        assert!((mat.transmittance(0.0) - 0.8).abs() < 1e-6);
        assert!((mat.transmittance(0.5) - 0.4).abs() < 1e-6);
        assert_eq!(mat.transmittance(1.0), 0.0);
    }

    #[test]
    fn transmittance_clamps_out_of_range_density() {
        let mat = ItemMaterial::Synthetic(Rgba::opaque([0.0, 1.0, 0.0]));
        assert_eq!(mat.transmittance(-3.0), 1.0);
        assert_eq!(mat.transmittance(7.0), 0.0);
    }

    #[test]
    fn profile_validation_checks_ranges() {
        let bad = MaterialProfile::new("x", Rgba::opaque([0.5; 3])).with_base_transmittance(1.5);
        assert!(bad.validate().is_err());

        let unnamed = MaterialProfile::new("", Rgba::opaque([0.5; 3]));
        assert!(unnamed.validate().is_err());
    }
}
