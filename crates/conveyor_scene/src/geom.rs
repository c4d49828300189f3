//! Stateless trigonometric and color helpers shared by the planners.
//!
//! Everything here is a pure function of its arguments: field-of-view
//! derivation from a viewing distance and extent, conversion between the
//! horizontal and vertical FOV of a sensor, polar offsets for light
//! placement, and HSV color generation for synthetic item materials.
use rand::RngCore;

/// Full field of view (radians) needed to see `extent` from `distance`.
///
/// At distance `d`, to see extent `w`: `fov = 2 * atan(w / (2 * d))`.
#[inline]
pub fn fov_for_extent(extent: f32, distance: f32) -> f32 {
    2.0 * (extent / (2.0 * distance)).atan()
}

/// Convert a field of view to the one on the sensor's other axis.
///
/// With `widen = false` the result is the narrower FOV obtained by dividing
/// the half-angle tangent by `aspect` (horizontal to vertical for a
/// landscape sensor); with `widen = true` the tangent is multiplied instead
/// (vertical to horizontal).
#[inline]
pub fn paired_fov(fov: f32, aspect: f32, widen: bool) -> f32 {
    let tan_half = (fov / 2.0).tan();
    let tan_other = if widen {
        tan_half * aspect
    } else {
        tan_half / aspect
    };
    2.0 * tan_other.atan()
}

/// Split a polar offset into its horizontal reach and height components.
///
/// Returns `(distance * cos(angle), distance * sin(angle))` for an angle
/// given in degrees above the horizontal.
#[inline]
pub fn offset_at_angle(angle_deg: f32, distance: f32) -> (f32, f32) {
    let angle_rad = angle_deg.to_radians();
    (distance * angle_rad.cos(), distance * angle_rad.sin())
}

/// Convert an HSV color (all components in [0, 1]) to RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = (h.fract() + 1.0).fract() * 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Draw a uniform float in `[lo, hi]`.
#[inline]
pub(crate) fn uniform_in(lo: f32, hi: f32, rng: &mut dyn RngCore) -> f32 {
    lo + rand01(rng) * (hi - lo)
}

/// Draw a uniform index in `[0, len)`. `len` must be non-zero.
#[inline]
pub(crate) fn uniform_index(len: usize, rng: &mut dyn RngCore) -> usize {
    debug_assert!(len > 0, "len must be > 0");
    ((rand01(rng) * len as f32) as usize).min(len - 1)
}

/// Draw a uniform integer in `[lo, hi]` inclusive.
#[inline]
pub(crate) fn uniform_int_inclusive(lo: u32, hi: u32, rng: &mut dyn RngCore) -> u32 {
    debug_assert!(lo <= hi, "lo must be <= hi");
    let span = hi - lo + 1;
    lo + ((rand01(rng) * span as f32) as u32).min(span - 1)
}
