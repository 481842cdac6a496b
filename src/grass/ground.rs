//! Flat ground disc drawn under the grass field.

use std::f64::consts::TAU;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::config::{FieldConfig, GrassStyle};
use super::mesh::MeshBuffers;

/// Rim segments used when tessellating the disc.
pub const GROUND_SEGMENTS: u32 = 32;

/// Surface parameters for the ground disc (standard PBR inputs, linear RGB).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundMaterial {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub double_sided: bool,
}

/// 8-bit sRGB-style hex channel triple to [0, 1] floats.
fn rgb8(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

impl GroundMaterial {
    pub fn for_style(style: GrassStyle) -> Self {
        match style {
            GrassStyle::Default => Self {
                color: rgb8(0x54, 0xa9, 0x55),
                emissive: rgb8(0x00, 0x45, 0x00),
                emissive_intensity: 0.1,
                roughness: 0.7,
                double_sided: true,
            },
            GrassStyle::Autumn => Self {
                color: rgb8(0xd2, 0x8c, 0x4d),
                emissive: rgb8(218, 176, 23),
                emissive_intensity: 0.5,
                roughness: 0.8,
                double_sided: true,
            },
        }
    }
}

/// Circular footprint of a grass field, lying in the XZ plane facing +Y.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundDisc {
    pub center: DVec3,
    pub radius: f64,
    pub style: GrassStyle,
    pub segments: u32,
    pub material: GroundMaterial,
}

impl GroundDisc {
    pub fn for_field(config: &FieldConfig) -> Self {
        Self {
            center: config.center_position,
            radius: config.radius(),
            style: config.style,
            segments: GROUND_SEGMENTS,
            material: GroundMaterial::for_style(config.style),
        }
    }

    /// Triangle-fan tessellation: center vertex followed by `segments + 1`
    /// rim vertices (first and last coincide so the UV seam closes).
    pub fn to_mesh(&self) -> MeshBuffers {
        let segments = self.segments.max(3);
        let rim = segments as usize + 1;
        let mut mesh = MeshBuffers {
            positions: Vec::with_capacity(rim + 1),
            uvs: Vec::with_capacity(rim + 1),
            colors: vec![[1.0; 3]; rim + 1],
            normals: vec![[0.0, 1.0, 0.0]; rim + 1],
            indices: Vec::with_capacity(segments as usize * 3),
        };

        mesh.positions.push(self.center.to_array());
        mesh.uvs.push([0.5, 0.5]);
        for i in 0..=segments {
            let theta = i as f64 / segments as f64 * TAU;
            let (sin, cos) = theta.sin_cos();
            let p = self.center + DVec3::new(cos * self.radius, 0.0, -sin * self.radius);
            mesh.positions.push(p.to_array());
            mesh.uvs.push([(cos + 1.0) / 2.0, (sin + 1.0) / 2.0]);
        }
        // Counter-clockwise seen from +Y
        for i in 1..=segments {
            mesh.indices.extend_from_slice(&[0, i, i + 1]);
        }
        mesh
    }
}
