//! Angle, rotation, distance and random helpers
//!
//! Angles at this API are in degrees unless the name says otherwise.
//! Everything here is pure; random helpers draw from a caller-owned RNG.

use glam::{Quat, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Convert degrees to radians
#[inline]
pub fn degrees_to_radians(value: f32) -> f32 {
    value * std::f32::consts::PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn radians_to_degrees(value: f32) -> f32 {
    value * 180.0 / std::f32::consts::PI
}

/// Angle of the line from (x1, y1) to (x2, y2), in degrees within (-180, 180]
#[inline]
pub fn angle_between_points(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let degrees = (y2 - y1).atan2(x2 - x1) * 180.0 / std::f32::consts::PI;
    // atan2(-0.0, negative) lands on -180; fold it onto the closed end
    if degrees <= -180.0 { 180.0 } else { degrees }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (x1 - x2).hypot(y1 - y2)
}

/// Wrap a heading into [0, 360)
///
/// Headings are stored unwrapped; call this before comparing them.
#[inline]
pub fn normalize_heading(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit direction of travel in the horizontal plane for a heading.
///
/// `x` maps to world x, `y` maps to world z.
#[inline]
pub fn heading_direction(degrees: f32) -> Vec2 {
    let rad = degrees_to_radians(degrees);
    Vec2::new(rad.cos(), rad.sin())
}

/// Rotation about the X axis by `degrees`
pub fn rotate_x(degrees: f32) -> Quat {
    Quat::from_rotation_x(degrees_to_radians(degrees))
}

/// Rotation about the Y axis by `degrees`
pub fn rotate_y(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees_to_radians(degrees))
}

/// Rotation about the Z axis by `degrees`
pub fn rotate_z(degrees: f32) -> Quat {
    Quat::from_rotation_z(degrees_to_radians(degrees))
}

/// Euler rotation composed as X * Y * Z.
///
/// The order is fixed; renderers that mirror object orientation rely on it.
pub fn rotate(x: f32, y: f32, z: f32) -> Quat {
    rotate_x(x) * rotate_y(y) * rotate_z(z)
}

/// Seeded RNG for reproducible randomness
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Uniform integer in `[min, max]` (inclusive)
pub fn random_int<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// One of the eleven values 0.0, 0.1, ..., 1.0
pub fn random_01<R: Rng>(rng: &mut R) -> f32 {
    random_int(rng, 0, 10) as f32 * 0.1
}

/// Fair coin flip
pub fn random_bool<R: Rng>(rng: &mut R) -> bool {
    random_int(rng, 0, 1) == 1
}

/// Fair +1.0 / -1.0 coin flip
pub fn random_sign<R: Rng>(rng: &mut R) -> f32 {
    if random_bool(rng) { 1.0 } else { -1.0 }
}
