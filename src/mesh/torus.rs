//! Torus (ring) mesh generation
//!
//! The tube cross-section is swept around a guide circle in the XY plane; the
//! torus axis is +Z. Both sweeps include 0° and 360°, so the seam vertices are
//! duplicated and UVs never wrap:
//!
//! - rows: `tube_segments + 1` poloidal steps (around the tube)
//! - columns: `segments + 1` toroidal steps (around the ring)
//! - vertex `(row, col)` lives at index `row * (segments + 1) + col`

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::{Mesh, Vertex};
use crate::consts::{RING_RADIUS, RING_SEGMENTS, RING_TUBE_RADIUS, RING_TUBE_SEGMENTS};
use crate::error::{Error, Result};
use crate::math::degrees_to_radians;

/// Torus shape parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorusParams {
    /// Subdivisions the long way around the ring (toroidal)
    pub segments: u32,
    /// Subdivisions around the tube cross-section (poloidal)
    pub tube_segments: u32,
    /// Distance from the torus center to the tube center
    pub radius: f32,
    /// Radius of the tube
    pub tube_radius: f32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            segments: RING_SEGMENTS,
            tube_segments: RING_TUBE_SEGMENTS,
            radius: RING_RADIUS,
            tube_radius: RING_TUBE_RADIUS,
        }
    }
}

impl TorusParams {
    pub fn new(segments: u32, tube_segments: u32, radius: f32, tube_radius: f32) -> Self {
        Self {
            segments,
            tube_segments,
            radius,
            tube_radius,
        }
    }

    /// Reject parameters that would produce degenerate geometry
    pub fn validate(&self) -> Result<()> {
        if self.segments < 3 {
            return Err(Error::invalid(
                "segments",
                format!("must be at least 3, got {}", self.segments),
            ));
        }
        if self.tube_segments < 3 {
            return Err(Error::invalid(
                "tube_segments",
                format!("must be at least 3, got {}", self.tube_segments),
            ));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::invalid(
                "radius",
                format!("must be finite and > 0, got {}", self.radius),
            ));
        }
        if !(self.tube_radius.is_finite() && self.tube_radius > 0.0) {
            return Err(Error::invalid(
                "tube_radius",
                format!("must be finite and > 0, got {}", self.tube_radius),
            ));
        }
        if self.vertex_count().is_none() {
            return Err(Error::invalid(
                "segments",
                "vertex count does not fit a u32 index buffer",
            ));
        }
        Ok(())
    }

    /// `(segments + 1) * (tube_segments + 1)`, if it fits a u32 index
    pub fn vertex_count(&self) -> Option<u32> {
        let n = (self.segments as u64 + 1) * (self.tube_segments as u64 + 1);
        u32::try_from(n).ok()
    }

    /// `6 * segments * tube_segments`
    pub fn index_count(&self) -> usize {
        6 * self.segments as usize * self.tube_segments as usize
    }

    pub fn generate(&self) -> Result<Mesh> {
        generate_torus(self.segments, self.tube_segments, self.radius, self.tube_radius)
    }
}

/// Build a torus mesh.
///
/// Returns `Error::InvalidParameter` for fewer than 3 subdivisions in either
/// direction or a non-positive radius. Output is deterministic for a given
/// input.
pub fn generate_torus(segments: u32, tube_segments: u32, radius: f32, tube_radius: f32) -> Result<Mesh> {
    let params = TorusParams::new(segments, tube_segments, radius, tube_radius);
    params.validate()?;

    let vertices = torus_vertices(&params);
    let indices = torus_indices(&params);

    log::debug!(
        "Generated torus {}x{} (r={}, tube={}): {} vertices, {} triangles",
        segments,
        tube_segments,
        radius,
        tube_radius,
        vertices.len(),
        indices.len() / 3
    );

    Ok(Mesh { vertices, indices })
}

fn torus_vertices(params: &TorusParams) -> Vec<Vertex> {
    let columns = params.segments + 1;
    let rows = params.tube_segments + 1;
    let mut vertices = Vec::with_capacity((columns * rows) as usize);

    for row in 0..rows {
        // Step angles are computed from the integer step so the last one is exactly 360
        let tube_angle = row as f32 * 360.0 / params.tube_segments as f32;
        let tube_rad = degrees_to_radians(tube_angle);

        let ring_distance = params.radius + params.tube_radius * tube_rad.cos();
        let z = params.tube_radius * tube_rad.sin();
        let base_normal = Vec3::new(tube_rad.cos(), 0.0, tube_rad.sin());

        // UV v folds the second half of the tube back onto the first
        let v = (2.0 * tube_angle / 360.0 - 1.0).abs();

        for col in 0..columns {
            let ring_angle = col as f32 * 360.0 / params.segments as f32;
            let ring_rad = degrees_to_radians(ring_angle);

            let position = Vec3::new(ring_distance * ring_rad.cos(), ring_distance * ring_rad.sin(), z);
            let normal = Quat::from_rotation_z(ring_rad) * base_normal;
            let uv = Vec2::new(1.0 - ring_angle / 360.0, v);

            vertices.push(Vertex::new(position, normal, uv));
        }
    }

    vertices
}

fn torus_indices(params: &TorusParams) -> Vec<u32> {
    let row_len = params.segments + 1;
    let mut indices = Vec::with_capacity(params.index_count());

    for row in 0..params.tube_segments {
        for col in 0..params.segments {
            let a = row * row_len + col;
            let b = row * row_len + col + 1;
            let c = (row + 1) * row_len + col + 1;
            let d = (row + 1) * row_len + col;

            indices.extend_from_slice(&[a, b, c]);
            indices.extend_from_slice(&[c, d, a]);
        }
    }

    indices
}
