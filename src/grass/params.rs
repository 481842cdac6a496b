//! GPU-ready grass uniform (16 bytes, 16-byte aligned).
//!
//! The renderer owns this value and rewrites `time` every frame to drive
//! wind sway. Generated geometry never changes after construction.

use std::time::Duration;

use bytemuck::{Pod, Zeroable};

use super::config::GrassStyle;

/// GPU uniform for the grass shader. Field order must match the shader params block.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrassParams {
    /// Elapsed time since the field was created, in milliseconds.
    ///
    /// `f32` resolution drops to 2 ms after about 4.6 hours and keeps
    /// coarsening, so long-running renderers should use `set_elapsed_wrapped`.
    pub time: f32,
    /// 0 = default, 1 = autumn
    pub style: u32,
    pub _pad: [f32; 2],
    // Total: 16 bytes
}

impl GrassParams {
    pub fn new(style: GrassStyle, elapsed: Duration) -> Self {
        Self {
            time: elapsed.as_secs_f32() * 1000.0,
            style: match style {
                GrassStyle::Default => 0,
                GrassStyle::Autumn => 1,
            },
            _pad: [0.0; 2],
        }
    }

    /// Per-frame update from the render loop.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.time = elapsed.as_secs_f32() * 1000.0;
    }

    /// Per-frame update with elapsed time wrapped to `period`.
    ///
    /// Keeps `time` small enough for millisecond precision. Pick a period
    /// that is a whole multiple of the shader's sway cycle so the wrap is
    /// seamless. A zero period leaves the time unwrapped.
    pub fn set_elapsed_wrapped(&mut self, elapsed: Duration, period: Duration) {
        let period_nanos = period.as_nanos();
        if period_nanos == 0 {
            self.set_elapsed(elapsed);
            return;
        }
        let wrapped = elapsed.as_nanos() % period_nanos;
        // wrapped < period, which fits u64 nanos for any realistic period
        let wrapped = Duration::from_nanos(u64::try_from(wrapped).unwrap_or(u64::MAX));
        self.set_elapsed(wrapped);
    }
}
