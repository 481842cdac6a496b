//! Grassfield - procedural grass field mesh generation

pub mod core;
pub mod math;
pub mod grass;
