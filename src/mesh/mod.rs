//! Procedural mesh generation
//!
//! Meshes are plain vertex + index buffers. Hosts upload them as-is:
//! `vertex_bytes` matches `Vertex::desc()` and `index_bytes` is `u32` triangles.

pub mod torus;
pub mod vertex;

pub use torus::{TorusParams, generate_torus};
pub use vertex::Vertex;

use serde::{Deserialize, Serialize};

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Three indices per triangle, fixed winding
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// True if the index buffer is whole triangles and every index is in range
    pub fn is_well_formed(&self) -> bool {
        let count = self.vertices.len() as u64;
        self.indices.len() % 3 == 0 && self.indices.iter().all(|&i| (i as u64) < count)
    }

    /// Flat vertex buffer (position, normal, uv per vertex)
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Flat index buffer (u32 per index)
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
