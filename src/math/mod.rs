//! Mathematical utilities and data structures

pub mod aabb;
pub mod range;
pub mod rng;

pub use aabb::Aabb;
pub use range::convert_range;
pub use rng::{RandomSource, SequenceRng, SimpleRng};
