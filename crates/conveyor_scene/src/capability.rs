//! Versioned host capability table for material parameters.
//!
//! The external materializer exposes different material input names
//! depending on its version. Instead of probing attributes at runtime
//! throughout the placement code, the available inputs are looked up once
//! from a static table keyed by host version, and missing inputs degrade to
//! a reduced-fidelity fallback with a warning. This is never fatal.
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layout::material::{ItemMaterial, Rgba};

/// Version of the external host application the scene is materialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostVersion {
    pub major: u32,
    pub minor: u32,
}

impl HostVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for HostVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

pub const INPUT_BASE_COLOR: &str = "Base Color";
pub const INPUT_ROUGHNESS: &str = "Roughness";
pub const INPUT_METALLIC: &str = "Metallic";
pub const INPUT_IOR: &str = "IOR";
pub const INPUT_TRANSMISSION: &str = "Transmission";
pub const INPUT_TRANSMISSION_WEIGHT: &str = "Transmission Weight";

/// Material input names available under the given host version.
pub fn material_inputs(version: HostVersion) -> &'static [&'static str] {
    if version >= HostVersion::new(4, 0) {
        // The transmission input was renamed in 4.0.
        &[
            INPUT_BASE_COLOR,
            INPUT_ROUGHNESS,
            INPUT_METALLIC,
            INPUT_IOR,
            INPUT_TRANSMISSION_WEIGHT,
        ]
    } else if version >= HostVersion::new(3, 0) {
        &[
            INPUT_BASE_COLOR,
            INPUT_ROUGHNESS,
            INPUT_METALLIC,
            INPUT_IOR,
            INPUT_TRANSMISSION,
        ]
    } else {
        // Legacy hosts only support a flat surface model.
        &[INPUT_BASE_COLOR, INPUT_ROUGHNESS]
    }
}

/// One resolved material parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Scalar(f32),
    Color(Rgba),
}

/// The final parameter assignments for one item's material, resolved
/// against a host version's capabilities.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct MaterialParamSet {
    /// Input name and value, in assignment order.
    pub assignments: Vec<(&'static str, ParamValue)>,
    /// True when a missing capability forced a reduced-fidelity fallback.
    pub degraded: bool,
}

impl MaterialParamSet {
    /// Resolve the parameters for a material at the given instance density.
    pub fn resolve(material: &ItemMaterial, density: f32, version: HostVersion) -> MaterialParamSet {
        let inputs = material_inputs(version);
        let available = |name: &str| inputs.contains(&name);

        let transmittance = material.transmittance(density);
        let mut assignments: Vec<(&'static str, ParamValue)> = Vec::new();
        let mut degraded = false;

        let mut base_color = material.base_color();

        let transmission_input = if available(INPUT_TRANSMISSION_WEIGHT) {
            Some(INPUT_TRANSMISSION_WEIGHT)
        } else if available(INPUT_TRANSMISSION) {
            Some(INPUT_TRANSMISSION)
        } else {
            None
        };

        match transmission_input {
            Some(input) => {
                assignments.push((input, ParamValue::Scalar(transmittance)));
            }
            None => {
                // Approximate translucency through base-color alpha instead.
                warn!(
                    "Host {} has no transmission input; folding transmittance into base-color alpha.",
                    version
                );
                base_color.a = 1.0 - transmittance;
                degraded = true;
            }
        }

        assignments.push((INPUT_BASE_COLOR, ParamValue::Color(base_color)));

        let (roughness, ior) = match material {
            ItemMaterial::Profile(profile) => (profile.roughness, Some(profile.ior)),
            ItemMaterial::Synthetic(_) => (0.4, None),
        };
        assignments.push((INPUT_ROUGHNESS, ParamValue::Scalar(roughness)));

        if let Some(ior) = ior {
            if available(INPUT_IOR) {
                assignments.push((INPUT_IOR, ParamValue::Scalar(ior)));
            } else {
                warn!("Host {} has no IOR input; skipping.", version);
                degraded = true;
            }
        }

        MaterialParamSet {
            assignments,
            degraded,
        }
    }

    /// Value assigned to the given input, if any.
    pub fn get(&self, input: &str) -> Option<&ParamValue> {
        self.assignments
            .iter()
            .find(|(name, _)| *name == input)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::material::MaterialProfile;

    fn profile_material() -> ItemMaterial {
        ItemMaterial::Profile(
            MaterialProfile::new("shrinkwrap", Rgba::new(0.9, 0.9, 0.95, 1.0))
                .with_base_transmittance(0.8)
                .with_ior(1.45),
        )
    }

    #[test]
    fn modern_host_uses_renamed_transmission_input() {
        let params = MaterialParamSet::resolve(&profile_material(), 0.5, HostVersion::new(4, 1));
        assert!(!params.degraded);
        let Some(ParamValue::Scalar(t)) = params.get(INPUT_TRANSMISSION_WEIGHT) else {
            panic!("expected transmission weight assignment");
        };
        assert!((t - 0.4).abs() < 1e-6);
        assert!(params.get(INPUT_TRANSMISSION).is_none());
        assert!(params.get(INPUT_IOR).is_some());
    }

    #[test]
    fn pre_rename_host_uses_legacy_input_name() {
        let params = MaterialParamSet::resolve(&profile_material(), 0.0, HostVersion::new(3, 6));
        assert!(!params.degraded);
        assert!(params.get(INPUT_TRANSMISSION).is_some());
        assert!(params.get(INPUT_TRANSMISSION_WEIGHT).is_none());
    }

    #[test]
    fn legacy_host_degrades_to_alpha_fallback() {
        let params = MaterialParamSet::resolve(&profile_material(), 0.5, HostVersion::new(2, 8));
        assert!(params.degraded);
        assert!(params.get(INPUT_TRANSMISSION).is_none());
        assert!(params.get(INPUT_TRANSMISSION_WEIGHT).is_none());

        let Some(ParamValue::Color(color)) = params.get(INPUT_BASE_COLOR) else {
            panic!("expected base color assignment");
        };
        // Transmittance 0.4 folded into alpha.
        assert!((color.a - 0.6).abs() < 1e-6);
    }

    #[test]
    fn synthetic_material_has_no_ior_assignment() {
        let mat = ItemMaterial::Synthetic(Rgba::opaque([0.2, 0.9, 0.4]));
        let params = MaterialParamSet::resolve(&mat, 0.3, HostVersion::new(4, 1));
        assert!(params.get(INPUT_IOR).is_none());
        assert!(!params.degraded);
    }
}
