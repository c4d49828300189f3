//! Layout generation: deterministic, density-controlled item placement.
//!
//! Given belt extents and an [`ItemPopulationPolicy`], [`generate`] produces
//! an ordered set of [`ItemPlacement`]s. Every stochastic decision is drawn
//! from one linear random stream in a fixed order (count first, then per
//! item: x, y, material choice, density), so a seeded run reproduces the
//! exact same layout bit for bit.
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

pub mod material;
pub mod policy;

pub use material::{ItemMaterial, MaterialProfile, Rgba};
pub use policy::{CountPolicy, ItemPopulationPolicy, MaterialSelection};

use crate::belt::{BeltSpec, BeltTransformId};
use crate::error::{Error, Result};
use crate::geom::{hsv_to_rgb, rand01, uniform_in, uniform_index, uniform_int_inclusive};

/// A single item instance placed on the belt.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlacement {
    /// Zero-based generation index.
    pub index: u32,
    /// Center position in belt-local space.
    pub position: Vec3,
    /// Edge length in meters.
    pub size: f32,
    pub material: ItemMaterial,
    /// Per-instance density scalar in [0, 1].
    pub density: f32,
    /// Deterministic ordering used only to bias elevation against
    /// coplanar-surface artifacts; never a physical stacking order.
    pub paint_order: u32,
    /// Belt transform this placement is expressed relative to.
    pub belt: BeltTransformId,
}

impl ItemPlacement {
    /// Final transmittance of this instance's material at its density.
    pub fn transmittance(&self) -> f32 {
        self.material.transmittance(self.density)
    }
}

/// Generate placements with a stream owned by this call.
///
/// A seeded policy uses `StdRng::seed_from_u64`; an unseeded one draws its
/// state from the OS and is not reproducible.
pub fn generate(belt: &BeltSpec, policy: &ItemPopulationPolicy) -> Result<Vec<ItemPlacement>> {
    let mut rng = match policy.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    generate_with_rng(belt, policy, &mut rng)
}

/// Generate placements consuming draws from a caller-provided stream.
pub fn generate_with_rng(
    belt: &BeltSpec,
    policy: &ItemPopulationPolicy,
    rng: &mut dyn RngCore,
) -> Result<Vec<ItemPlacement>> {
    belt.validate()?;
    policy.validate()?;

    let (half_length, half_width) = belt.half_extents();
    let half_size = policy.size / 2.0;
    if policy.size > belt.width {
        return Err(Error::invalid_geometry(
            "item size (exceeds belt width)",
            policy.size,
        ));
    }
    if policy.size > belt.length {
        return Err(Error::invalid_geometry(
            "item size (exceeds belt length)",
            policy.size,
        ));
    }

    let count = draw_count(belt, policy, rng);

    // Items must sit fully on the belt: inset by half the item size per edge.
    let x_min = -half_length + half_size;
    let x_max = half_length - half_size;
    let y_min = -half_width + half_size;
    let y_max = half_width - half_size;
    let base_z = belt.thickness / 2.0 + half_size;

    let mut placements = Vec::with_capacity(count as usize);
    for index in 0..count {
        let x = uniform_in(x_min, x_max, rng);
        let y = uniform_in(y_min, y_max, rng);

        let material = match policy.selection {
            MaterialSelection::Catalog => {
                let choice = uniform_index(policy.materials.len(), rng);
                ItemMaterial::Profile(policy.materials[choice].clone())
            }
            MaterialSelection::SyntheticColor => {
                ItemMaterial::Synthetic(synthetic_color(rng))
            }
        };

        let density = uniform_in(policy.density_min, policy.density_max, rng);

        // Strictly increasing micro-offset so no two items share an exact
        // elevation.
        let z = base_z + index as f32 * policy.z_layer_offset;

        placements.push(ItemPlacement {
            index,
            position: Vec3::new(x, y, z),
            size: policy.size,
            material,
            density,
            paint_order: index,
            belt: BeltTransformId::ROOT,
        });
    }

    info!(
        "Generated {} items on a {:.2}m x {:.2}m belt.",
        placements.len(),
        belt.length,
        belt.width
    );

    Ok(placements)
}

fn draw_count(belt: &BeltSpec, policy: &ItemPopulationPolicy, rng: &mut dyn RngCore) -> u32 {
    match policy.count {
        CountPolicy::Range { min, max } => uniform_int_inclusive(min, max, rng),
        CountPolicy::SpatialDensity { per_area, variance } => {
            let factor = uniform_in(1.0 - variance, 1.0 + variance, rng);
            let raw = belt.area() * per_area * factor;
            (raw.round() as u32).max(1)
        }
    }
}

/// Bright procedural color: uniform hue, saturation and value clamped to
/// visually legible ranges.
fn synthetic_color(rng: &mut dyn RngCore) -> Rgba {
    let hue = rand01(rng);
    let saturation = uniform_in(0.6, 1.0, rng);
    let value = uniform_in(0.5, 1.0, rng);
    Rgba::opaque(hsv_to_rgb(hue, saturation, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn belt() -> BeltSpec {
        BeltSpec::new(2.0, 0.6, 0.1, 0.05)
    }

    fn seeded_policy() -> ItemPopulationPolicy {
        ItemPopulationPolicy::new(0.1, CountPolicy::Range { min: 10, max: 30 }).with_seed(42)
    }

    #[test]
    fn seeded_generation_is_bit_for_bit_deterministic() {
        let a = generate(&belt(), &seeded_policy()).unwrap();
        let b = generate(&belt(), &seeded_policy()).unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a, b);

        let other = generate(&belt(), &seeded_policy().with_seed(43)).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn placements_stay_inside_belt_bounds() {
        let policy = seeded_policy();
        let placements = generate(&belt(), &policy).unwrap();
        assert!(!placements.is_empty());

        let half_size = policy.size / 2.0;
        for p in &placements {
            assert!(p.position.x >= -1.0 + half_size && p.position.x <= 1.0 - half_size);
            assert!(p.position.y >= -0.3 + half_size && p.position.y <= 0.3 - half_size);
        }
    }

    #[test]
    fn elevation_is_strictly_increasing() {
        let placements = generate(&belt(), &seeded_policy()).unwrap();
        for pair in placements.windows(2) {
            assert!(pair[0].position.z < pair[1].position.z);
        }
        // Base elevation sits on top of the belt slab.
        let first = &placements[0];
        assert!((first.position.z - (0.05 + 0.05)).abs() < 1e-6);
    }

    #[test]
    fn paint_order_is_monotonic_with_index() {
        let placements = generate(&belt(), &seeded_policy()).unwrap();
        for p in &placements {
            assert_eq!(p.paint_order, p.index);
        }
    }

    #[test]
    fn spatial_density_with_zero_variance_is_exact() {
        // Area 2.0 * 0.6 = 1.2 m^2; density 10/m^2 -> exactly 12 items.
        let policy = ItemPopulationPolicy::new(
            0.1,
            CountPolicy::SpatialDensity {
                per_area: 10.0,
                variance: 0.0,
            },
        )
        .with_seed(7);
        let placements = generate(&belt(), &policy).unwrap();
        assert_eq!(placements.len(), 12);
    }

    #[test]
    fn spatial_density_never_drops_below_one() {
        let policy = ItemPopulationPolicy::new(
            0.05,
            CountPolicy::SpatialDensity {
                per_area: 0.01,
                variance: 0.0,
            },
        )
        .with_seed(7);
        let placements = generate(&belt(), &policy).unwrap();
        assert_eq!(placements.len(), 1);
    }

    #[test]
    fn catalog_mode_assigns_profiles_from_catalog() {
        let catalog = vec![
            MaterialProfile::new("cardboard", Rgba::opaque([0.7, 0.5, 0.3]))
                .with_base_transmittance(0.05),
            MaterialProfile::new("shrinkwrap", Rgba::new(0.9, 0.9, 0.95, 0.6))
                .with_base_transmittance(0.8),
        ];
        let policy = seeded_policy().with_catalog(catalog.clone());
        let placements = generate(&belt(), &policy).unwrap();
        for p in &placements {
            match &p.material {
                ItemMaterial::Profile(profile) => {
                    assert!(catalog.iter().any(|c| c.name == profile.name));
                }
                ItemMaterial::Synthetic(_) => panic!("catalog mode produced a synthetic color"),
            }
            assert!((0.0..=1.0).contains(&p.density));
        }
    }

    #[test]
    fn synthetic_colors_stay_legible() {
        let placements = generate(&belt(), &seeded_policy()).unwrap();
        for p in &placements {
            let ItemMaterial::Synthetic(color) = &p.material else {
                panic!("expected synthetic material");
            };
            let max = color.r.max(color.g).max(color.b);
            // Value was drawn from [0.5, 1.0].
            assert!(max >= 0.5 - 1e-6 && max <= 1.0 + 1e-6);
            assert_eq!(color.a, 1.0);
        }
    }

    #[test]
    fn oversized_items_are_rejected() {
        let policy = ItemPopulationPolicy::new(0.7, CountPolicy::Range { min: 1, max: 1 });
        assert!(matches!(
            generate(&belt(), &policy),
            Err(Error::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn unseeded_runs_do_not_share_a_stream() {
        let policy =
            ItemPopulationPolicy::new(0.1, CountPolicy::Range { min: 200, max: 200 });
        let a = generate(&belt(), &policy).unwrap();
        let b = generate(&belt(), &policy).unwrap();
        // Counts agree by construction; positions almost surely differ.
        assert_eq!(a.len(), 200);
        assert_ne!(a, b);
    }
}
