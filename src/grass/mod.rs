//! Procedural grass field generation.
//!
//! Scatters blades uniformly over a circular footprint and builds one
//! indexed mesh for the whole field, plus a ground disc descriptor for the
//! renderer. Generation is a pure function of the config and the random
//! draws, so a seeded source reproduces the same field.

pub mod blade;
pub mod config;
pub mod ground;
pub mod mesh;
pub mod params;
pub mod presets;

pub use blade::{Blade, BladeVertex, generate_blade};
pub use config::{FieldConfig, GrassStyle};
pub use ground::{GroundDisc, GroundMaterial};
pub use mesh::{GrassVertex, MeshBuffers};
pub use params::GrassParams;
pub use presets::FieldPreset;

use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::math::{Aabb, RandomSource, SimpleRng, convert_range};

/// Output of one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedField {
    pub mesh: MeshBuffers,
    pub ground: GroundDisc,
    /// Bounds of the blades and the ground disc together. Never empty.
    pub bounds: Aabb,
}

/// Builds the blade mesh for one `FieldConfig`.
pub struct GrassFieldGenerator<'a> {
    config: &'a FieldConfig,
    radius: f64,
    surface_min: (f64, f64),
    surface_max: (f64, f64),
}

impl<'a> GrassFieldGenerator<'a> {
    pub fn new(config: &'a FieldConfig) -> Self {
        Self {
            config,
            radius: config.radius(),
            surface_min: config.surface_min(),
            surface_max: config.surface_max(),
        }
    }

    pub fn config(&self) -> &FieldConfig {
        self.config
    }

    /// Uniform point on the footprint disc. Draws radius then angle.
    ///
    /// The square root on the radial draw keeps density constant per unit
    /// area instead of piling blades up near the center.
    pub fn sample_center(&self, rng: &mut impl RandomSource) -> DVec3 {
        let r = self.radius * rng.next_f64().sqrt();
        let theta = rng.angle();
        let c = self.config.center_position;
        DVec3::new(c.x + r * theta.cos(), c.y, c.z + r * theta.sin())
    }

    /// Texture coordinate of a point across the footprint's bounding square.
    pub fn surface_uv(&self, pos: DVec3) -> [f64; 2] {
        [
            convert_range(pos.x, self.surface_min.0, self.surface_max.0, 0.0, 1.0),
            convert_range(pos.z, self.surface_min.1, self.surface_max.1, 0.0, 1.0),
        ]
    }

    /// Generate the full field. Draws five values per blade.
    pub fn generate(&self, rng: &mut impl RandomSource) -> GeneratedField {
        let count = self.config.blade_count as usize;
        let mut mesh = MeshBuffers::with_capacity(count);

        for _ in 0..count {
            let center = self.sample_center(rng);
            let uv = self.surface_uv(center);
            let blade = generate_blade(center, uv, self.config, rng);
            mesh.push_blade(&blade);
        }
        mesh.compute_normals();
        debug_assert!(mesh.is_consistent());

        log::debug!(
            "Generated {} grass field: {} blades, {} vertices, {} triangles",
            self.config.style,
            count,
            mesh.vertex_count(),
            mesh.triangle_count(),
        );

        let ground = GroundDisc::for_field(self.config);
        let mut bounds = mesh.bounds();
        let rim = DVec3::new(ground.radius, 0.0, ground.radius);
        bounds.expand(ground.center - rim);
        bounds.expand(ground.center + rim);

        GeneratedField { mesh, ground, bounds }
    }
}

/// Generate independent fields in parallel, one seeded `SimpleRng` each.
///
/// Each result equals what a sequential `generate` with the same seed
/// would produce. Output order matches `jobs`.
pub fn generate_fields(jobs: &[(FieldConfig, u64)]) -> Vec<GeneratedField> {
    jobs.par_iter()
        .map(|(config, seed)| {
            let mut rng = SimpleRng::new(*seed);
            GrassFieldGenerator::new(config).generate(&mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grass::blade::{BLADE_INDEX_COUNT, BLADE_VERTEX_COUNT};

    fn test_config(blade_count: u32) -> FieldConfig {
        FieldConfig {
            center_position: DVec3::ZERO,
            area_diameter: 10.0,
            blade_count,
            blade_width: 0.1,
            blade_height: 1.0,
            blade_height_variation: 0.0,
            style: GrassStyle::Default,
        }
    }

    /// Blade centers recovered as the midpoint of each base pair.
    fn blade_centers(mesh: &MeshBuffers) -> Vec<DVec3> {
        mesh.positions
            .chunks_exact(BLADE_VERTEX_COUNT)
            .map(|v| (DVec3::from_array(v[0]) + DVec3::from_array(v[1])) * 0.5)
            .collect()
    }

    #[test]
    fn test_end_to_end_counts() {
        let cfg = test_config(100);
        let field = GrassFieldGenerator::new(&cfg).generate(&mut SimpleRng::new(42));
        let mesh = &field.mesh;

        assert_eq!(mesh.positions.len(), 500);
        assert_eq!(mesh.position_floats().len(), 5 * 100 * 3);
        assert_eq!(mesh.indices.len(), 900);
        assert_eq!(mesh.uvs.len(), 500);
        assert_eq!(mesh.colors.len(), 500);
        assert_eq!(mesh.normals.len(), 500);
        assert!(mesh.indices.iter().all(|&i| i < 500));
        assert!(mesh.is_consistent());

        for v in mesh.positions.chunks_exact(BLADE_VERTEX_COUNT) {
            let bl = DVec3::from_array(v[0]);
            let br = DVec3::from_array(v[1]);
            let base = bl - br;
            assert!((base.length() - 0.1).abs() < 1e-12);
            assert_eq!(base.y, 0.0);
            // Tip stands at exactly blade_height with zero variation
            assert_eq!(v[4][1], 1.0);
        }

        assert_eq!(field.ground.radius, 5.0);
        assert_eq!(field.ground.style, GrassStyle::Default);
    }

    #[test]
    fn test_zero_blades() {
        let cfg = test_config(0);
        let field = GrassFieldGenerator::new(&cfg).generate(&mut SimpleRng::new(1));
        assert!(field.mesh.positions.is_empty());
        assert!(field.mesh.indices.is_empty());
        assert!(field.mesh.is_consistent());
        assert_eq!(field.ground.radius, 5.0);
        // Ground disc alone spans the field footprint
        assert_eq!(field.bounds.min, DVec3::new(-5.0, 0.0, -5.0));
        assert_eq!(field.bounds.max, DVec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn test_index_blocks_per_blade() {
        let cfg = test_config(4);
        let field = GrassFieldGenerator::new(&cfg).generate(&mut SimpleRng::new(9));
        for (i, block) in field.mesh.indices.chunks_exact(BLADE_INDEX_COUNT).enumerate() {
            let base = (i * BLADE_VERTEX_COUNT) as u32;
            assert!(block.iter().all(|&idx| idx >= base && idx < base + 5));
            assert_eq!(block.iter().filter(|&&idx| idx == base + 4).count(), 1);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let cfg = test_config(50);
        let generator = GrassFieldGenerator::new(&cfg);
        let a = generator.generate(&mut SimpleRng::new(1234));
        let b = generator.generate(&mut SimpleRng::new(1234));
        let c = generator.generate(&mut SimpleRng::new(4321));
        assert_eq!(a, b);
        assert_ne!(a.mesh.positions, c.mesh.positions);
    }

    #[test]
    fn test_centers_inside_disc_many_seeds() {
        let cfg = FieldConfig {
            center_position: DVec3::new(3.0, -2.0, -7.0),
            ..test_config(300)
        };
        for seed in 0..40 {
            let field = GrassFieldGenerator::new(&cfg).generate(&mut SimpleRng::new(seed));
            for c in blade_centers(&field.mesh) {
                let d = c - cfg.center_position;
                assert!((d.y).abs() < 1e-12);
                assert!(d.length() <= cfg.radius() + 1e-9, "seed {} center {:?}", seed, c);
            }
        }
    }

    #[test]
    fn test_radial_density_is_area_uniform() {
        let cfg = test_config(1);
        let generator = GrassFieldGenerator::new(&cfg);
        let mut rng = SimpleRng::new(2024);

        // Under area-uniform sampling (r/R)^2 is uniform on [0, 1)
        const BUCKETS: usize = 10;
        const N: usize = 20_000;
        let mut counts = [0usize; BUCKETS];
        let mut inner_half = 0usize;
        for _ in 0..N {
            let c = generator.sample_center(&mut rng);
            let t = (c.x * c.x + c.z * c.z) / (cfg.radius() * cfg.radius());
            counts[((t * BUCKETS as f64) as usize).min(BUCKETS - 1)] += 1;
            if t.sqrt() < 0.5 {
                inner_half += 1;
            }
        }

        let expected = N as f64 / BUCKETS as f64;
        let chi2: f64 = counts
            .iter()
            .map(|&o| (o as f64 - expected).powi(2) / expected)
            .sum();
        // 9 degrees of freedom, p = 0.001
        assert!(chi2 < 27.88, "chi-square {} for counts {:?}", chi2, counts);

        // Inner half-radius holds a quarter of the area, not half the blades
        let frac = inner_half as f64 / N as f64;
        assert!((frac - 0.25).abs() < 0.02, "inner fraction {}", frac);
    }

    #[test]
    fn test_uvs_cover_unit_square() {
        let cfg = FieldConfig {
            center_position: DVec3::new(-20.0, 0.0, 8.0),
            ..test_config(500)
        };
        let field = GrassFieldGenerator::new(&cfg).generate(&mut SimpleRng::new(5));
        for uv in &field.mesh.uvs {
            assert!((0.0..=1.0).contains(&uv[0]), "{:?}", uv);
            assert!((0.0..=1.0).contains(&uv[1]), "{:?}", uv);
        }
        let generator = GrassFieldGenerator::new(&cfg);
        assert_eq!(generator.surface_uv(cfg.center_position), [0.5, 0.5]);
    }

    #[test]
    fn test_heights_with_variation() {
        let cfg = FieldConfig {
            blade_height: 0.8,
            blade_height_variation: 0.3,
            ..test_config(400)
        };
        let field = GrassFieldGenerator::new(&cfg).generate(&mut SimpleRng::new(77));
        let tips: Vec<f64> = field.mesh.positions
            .chunks_exact(BLADE_VERTEX_COUNT)
            .map(|v| v[4][1])
            .collect();
        assert!(tips.iter().all(|&h| (0.8..1.1).contains(&h)));
        // Variation is actually drawn
        let min = tips.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = tips.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(max - min > 0.2);
    }

    #[test]
    fn test_bounds_contain_field() {
        let cfg = test_config(200);
        let field = GrassFieldGenerator::new(&cfg).generate(&mut SimpleRng::new(8));
        let b = field.mesh.bounds();
        assert!(b.min.y >= 0.0 && b.max.y <= 1.0);
        let reach = cfg.radius() + cfg.blade_width / 2.0 + blade::TIP_OFFSET;
        assert!(b.min.x >= -reach && b.max.x <= reach);
        assert!(b.min.z >= -reach && b.max.z <= reach);

        // Field bounds add the ground disc to the blade bounds
        let fb = field.bounds;
        assert_eq!(fb.max.y, b.max.y);
        assert!(fb.min.x <= -cfg.radius() && fb.max.x >= cfg.radius());
        assert!(fb.min.x <= b.min.x && fb.max.z >= b.max.z);
        assert_eq!(fb.center().y, b.max.y / 2.0);
        assert!(fb.size().x >= 2.0 * cfg.radius());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let jobs: Vec<(FieldConfig, u64)> = vec![
            (test_config(20), 1),
            (FieldConfig { style: GrassStyle::Autumn, ..test_config(30) }, 2),
            (test_config(0), 3),
        ];
        let parallel = generate_fields(&jobs);
        assert_eq!(parallel.len(), 3);
        for ((cfg, seed), field) in jobs.iter().zip(&parallel) {
            let sequential = GrassFieldGenerator::new(cfg).generate(&mut SimpleRng::new(*seed));
            assert_eq!(&sequential, field);
        }
        assert_eq!(parallel[1].ground.style, GrassStyle::Autumn);
    }

    #[test]
    fn test_serialize_field() {
        let cfg = test_config(3);
        let field = GrassFieldGenerator::new(&cfg).generate(&mut SimpleRng::new(6));
        let json = serde_json::to_string(&field).unwrap();
        let back: GeneratedField = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mesh.indices, field.mesh.indices);
        assert_eq!(back.ground, field.ground);
        assert_eq!(back.bounds.max.y, field.bounds.max.y);
    }
}
