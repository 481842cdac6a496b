//! Single grass blade primitive.
//!
//! A blade is five vertices: two at the base, two at half height with half
//! the base width, and a tip bent in an independent random direction.
//! Three triangles share the tip vertex.

use glam::DVec3;

use crate::math::RandomSource;
use super::config::FieldConfig;

/// Vertices emitted per blade.
pub const BLADE_VERTEX_COUNT: usize = 5;
/// Indices emitted per blade.
pub const BLADE_INDEX_COUNT: usize = 9;

/// Blade width at half height, relative to the base width.
pub const MID_WIDTH_RATIO: f64 = 0.5;
/// Horizontal distance the tip leans along its bend direction.
pub const TIP_OFFSET: f64 = 0.1;

/// Vertex tint at the base. Darkens toward the ground in the blade shader.
pub const BASE_COLOR: [f64; 3] = [0.0, 0.0, 0.0];
pub const MID_COLOR: [f64; 3] = [0.5, 0.5, 0.5];
pub const TIP_COLOR: [f64; 3] = [1.0, 1.0, 1.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeVertex {
    pub position: DVec3,
    pub uv: [f64; 2],
    pub color: [f64; 3],
}

/// Generated blade. Vertex order: bottom-left, bottom-right, top-right,
/// top-left, tip.
#[derive(Clone, Debug, PartialEq)]
pub struct Blade {
    pub center: DVec3,
    pub height: f64,
    pub vertices: [BladeVertex; BLADE_VERTEX_COUNT],
}

impl Blade {
    pub const BOTTOM_LEFT: usize = 0;
    pub const BOTTOM_RIGHT: usize = 1;
    pub const TOP_RIGHT: usize = 2;
    pub const TOP_LEFT: usize = 3;
    pub const TIP: usize = 4;

    pub fn tip(&self) -> DVec3 {
        self.vertices[Self::TIP].position
    }
}

/// Unit direction in the XZ plane for a yaw angle.
#[inline]
fn yaw_direction(angle: f64) -> DVec3 {
    DVec3::new(angle.sin(), 0.0, -angle.cos())
}

/// Build one blade standing at `center`.
///
/// Draws three values from `rng`, in order: height variation, yaw, tip bend.
pub fn generate_blade(
    center: DVec3,
    uv: [f64; 2],
    config: &FieldConfig,
    rng: &mut impl RandomSource,
) -> Blade {
    let mid_width = config.blade_width * MID_WIDTH_RATIO;
    let height = config.blade_height + rng.next_f64() * config.blade_height_variation;

    let yaw = yaw_direction(rng.angle());
    let tip_bend = yaw_direction(rng.angle());

    let half_base = yaw * (config.blade_width / 2.0);
    let half_mid = yaw * (mid_width / 2.0);
    let mid_lift = DVec3::new(0.0, height / 2.0, 0.0);

    let bl = center + half_base;
    let br = center - half_base;
    let tl = center + half_mid + mid_lift;
    let tr = center - half_mid + mid_lift;
    let tc = center + tip_bend * TIP_OFFSET + DVec3::new(0.0, height, 0.0);

    let vertex = |position, color| BladeVertex { position, uv, color };
    Blade {
        center,
        height,
        vertices: [
            vertex(bl, BASE_COLOR),
            vertex(br, BASE_COLOR),
            vertex(tr, MID_COLOR),
            vertex(tl, MID_COLOR),
            vertex(tc, TIP_COLOR),
        ],
    }
}

/// Triangle indices for the blade whose first vertex is `base`.
#[inline]
pub fn blade_indices(base: u32) -> [u32; BLADE_INDEX_COUNT] {
    [
        base, base + 1, base + 2,
        base + 2, base + 4, base + 3,
        base + 3, base, base + 2,
    ]
}
