//! Indexed triangle buffers produced by the grass generator.
//!
//! Attributes are stored per vertex in parallel arrays. `interleaved()`
//! converts to the `f32` layout uploaded to the GPU.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::math::Aabb;
use super::blade::{Blade, BLADE_INDEX_COUNT, BLADE_VERTEX_COUNT, blade_indices};

/// Interleaved GPU vertex (44 bytes). Must match the grass vertex shader inputs.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrassVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 3],
    pub normal: [f32; 3],
}

/// First index of a blade appended after `vertex_count` vertices, if the
/// whole blade stays addressable with `u32` indices.
pub fn blade_base(vertex_count: usize) -> Option<u32> {
    let last = vertex_count.checked_add(BLADE_VERTEX_COUNT - 1)?;
    u32::try_from(last).ok()?;
    u32::try_from(vertex_count).ok()
}

/// Position/uv/color/normal buffers plus triangle indices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub positions: Vec<[f64; 3]>,
    pub uvs: Vec<[f64; 2]>,
    pub colors: Vec<[f64; 3]>,
    /// Filled by `compute_normals`; empty until then.
    pub normals: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Empty buffers sized for `blades` blades.
    pub fn with_capacity(blades: usize) -> Self {
        let verts = blades * BLADE_VERTEX_COUNT;
        Self {
            positions: Vec::with_capacity(verts),
            uvs: Vec::with_capacity(verts),
            colors: Vec::with_capacity(verts),
            normals: Vec::new(),
            indices: Vec::with_capacity(blades * BLADE_INDEX_COUNT),
        }
    }

    /// Append a blade, offsetting its indices past the existing vertices.
    ///
    /// The mesh must stay within `u32` vertex indices (see
    /// `config::MAX_BLADE_COUNT`); this is checked in debug builds only.
    pub fn push_blade(&mut self, blade: &Blade) {
        let base = blade_base(self.positions.len());
        debug_assert!(
            base.is_some(),
            "grass mesh with {} vertices exceeds u32 index range",
            self.positions.len()
        );
        let base = base.unwrap_or(u32::MAX);
        for v in &blade.vertices {
            self.positions.push(v.position.to_array());
            self.uvs.push(v.uv);
            self.colors.push(v.color);
        }
        self.indices.extend_from_slice(&blade_indices(base));
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` slice.
    pub fn position_floats(&self) -> &[f64] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Smooth per-vertex normals: area-weighted sum of incident triangle
    /// normals. Vertices touching only degenerate triangles get a zero normal.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![DVec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = DVec3::from_array(self.positions[a]);
            let pb = DVec3::from_array(self.positions[b]);
            let pc = DVec3::from_array(self.positions[c]);
            // Unnormalized cross product weights by triangle area
            let face = (pc - pb).cross(pa - pb);
            acc[a] += face;
            acc[b] += face;
            acc[c] += face;
        }
        self.normals = acc.into_iter().map(|n| n.normalize_or_zero().to_array()).collect();
    }

    /// Bounding box of all vertex positions. Empty for an empty mesh.
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for p in &self.positions {
            aabb.expand(DVec3::from_array(*p));
        }
        aabb
    }

    /// Check the buffer invariants: whole blades only, attribute arrays the
    /// same length, and every index in range.
    pub fn is_consistent(&self) -> bool {
        let verts = self.positions.len();
        verts % BLADE_VERTEX_COUNT == 0
            && self.indices.len() == verts / BLADE_VERTEX_COUNT * BLADE_INDEX_COUNT
            && self.uvs.len() == verts
            && self.colors.len() == verts
            && (self.normals.is_empty() || self.normals.len() == verts)
            && self.indices.iter().all(|&i| (i as usize) < verts)
    }

    /// Convert to interleaved `f32` vertices for upload.
    pub fn interleaved(&self) -> Vec<GrassVertex> {
        let to_f32 = |v: [f64; 3]| [v[0] as f32, v[1] as f32, v[2] as f32];
        (0..self.positions.len())
            .map(|i| GrassVertex {
                position: to_f32(self.positions[i]),
                uv: [self.uvs[i][0] as f32, self.uvs[i][1] as f32],
                color: to_f32(self.colors[i]),
                normal: self.normals.get(i).copied().map_or([0.0; 3], to_f32),
            })
            .collect()
    }
}
