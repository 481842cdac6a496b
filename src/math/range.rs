//! Linear range remapping

/// Remap `val` linearly from `[old_min, old_max]` to `[new_min, new_max]`.
///
/// Values outside the old range extrapolate. `old_min == old_max` divides by
/// zero and is the caller's responsibility.
#[inline]
pub fn convert_range(val: f64, old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> f64 {
    (val - old_min) * (new_max - new_min) / (old_max - old_min) + new_min
}
