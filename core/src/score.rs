//! # CoreMark Score
//!
//! `score = iterations * 1_000_000 / elapsed_ticks`, i.e. iterations per
//! million ticks of the cycle counter ("CoreMark / MHz").

use core::fmt;

use crate::error::{PortError, PortResult};
use crate::timing::ElapsedTicks;

/// Normalized throughput of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    iterations: u32,
    elapsed: ElapsedTicks,
}

impl Score {
    /// Score `iterations` completed in `elapsed`
    ///
    /// Fails with [`PortError::MeasurementWindowTooShort`] on an empty window.
    pub fn compute(iterations: u32, elapsed: ElapsedTicks) -> PortResult<Self> {
        if elapsed.is_zero() {
            return Err(PortError::MeasurementWindowTooShort);
        }
        Ok(Self {
            iterations,
            elapsed,
        })
    }

    /// Iterations per million ticks
    pub fn per_mhz(&self) -> f64 {
        (1_000_000.0 * f64::from(self.iterations)) / f64::from(self.elapsed.get())
    }

    /// Iterations scored
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Window the iterations ran in
    pub const fn elapsed(&self) -> ElapsedTicks {
        self.elapsed
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.per_mhz())
    }
}
