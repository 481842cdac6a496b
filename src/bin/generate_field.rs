//! Generate grass field meshes and write them as JSON.
//!
//! Usage:
//!   cargo run --release --bin generate_field -- --preset autumn --seed 7 --variants 4 --out fields
//!   cargo run --release --bin generate_field -- --config my_field.json --out fields
//!   cargo run --release --bin generate_field -- --environment grass

use std::path::{Path, PathBuf};
use std::time::Instant;

use grassfield::core::{Error, Result};
use grassfield::grass::{FieldConfig, FieldPreset, GeneratedField, generate_fields};

/// Value following `--name`, if present.
fn arg_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_number<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> Result<T> {
    match arg_value(args, name) {
        Some(v) => v.parse().map_err(|_| {
            Error::InvalidConfig(format!("{} expects a number, got '{}'", name, v))
        }),
        None => Ok(default),
    }
}

fn resolve_config(args: &[String]) -> Result<Option<FieldConfig>> {
    if let Some(path) = arg_value(args, "--config") {
        return FieldConfig::load_json(Path::new(path)).map(Some);
    }
    if let Some(env) = arg_value(args, "--environment") {
        return Ok(FieldPreset::from_environment(env).map(FieldPreset::config));
    }
    let preset: FieldPreset = arg_value(args, "--preset").unwrap_or("meadow").parse()?;
    Ok(Some(preset.config()))
}

/// Seeds `seed..seed + variants`, rejecting ranges that overflow `u64`.
fn seed_range(seed: u64, variants: u64) -> Result<std::ops::Range<u64>> {
    let end = seed.checked_add(variants).ok_or_else(|| {
        Error::InvalidConfig(format!(
            "--seed {} with --variants {} overflows u64", seed, variants
        ))
    })?;
    Ok(seed..end)
}

fn write_field(dir: &Path, seed: u64, field: &GeneratedField) -> Result<PathBuf> {
    let path = dir.join(format!("field_{}_{}.json", field.ground.style, seed));
    std::fs::write(&path, serde_json::to_string(field)?)?;
    Ok(path)
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let Some(config) = resolve_config(&args)? else {
        log::info!("Environment has no grass field, nothing to generate");
        return Ok(());
    };
    config.validate()?;

    let seed: u64 = parse_number(&args, "--seed", 12345)?;
    let variants: u64 = parse_number(&args, "--variants", 1)?;
    let out_dir = PathBuf::from(arg_value(&args, "--out").unwrap_or("fields"));
    let seeds = seed_range(seed, variants)?;

    log::info!(
        "Generating {} {} field(s): {} blades, diameter {}, seeds {}..{}",
        variants,
        config.style,
        config.blade_count,
        config.area_diameter,
        seeds.start,
        seeds.end,
    );

    let jobs: Vec<(FieldConfig, u64)> = seeds
        .map(|s| (config.clone(), s))
        .collect();

    let start = Instant::now();
    let fields = generate_fields(&jobs);
    log::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());

    std::fs::create_dir_all(&out_dir)?;
    for ((_, s), field) in jobs.iter().zip(&fields) {
        let path = write_field(&out_dir, *s, field)?;
        let size = field.bounds.size();
        log::info!(
            "  seed {}: {} vertices, {} triangles, bounds {:.2} x {:.2} x {:.2} at {:.2?} -> {}",
            s,
            field.mesh.vertex_count(),
            field.mesh.triangle_count(),
            size.x,
            size.y,
            size.z,
            field.bounds.center().to_array(),
            path.display(),
        );
    }
    Ok(())
}

fn main() {
    grassfield::core::logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
