//! # Timing Source
//!
//! Start/stop sampling of the cycle counter and conversion of the elapsed
//! window into ticks and seconds.
//!
//! ```text
//!   start_time():  disable ─▶ reset ─▶ enable ─▶ sample mcycle → start
//!   stop_time():   sample mcycle → stop ─▶ disable
//!   get_time():    (stop - start) / TIMER_RES_DIVIDER
//! ```

use core::fmt;
use core::num::NonZeroU32;
use core::ops::Mul;

use ibex_hal::PerfCounters;

use crate::pcount;

// =============================================================================
// Time Types
// =============================================================================

/// Raw cycle counter sample
///
/// Only the difference of two samples taken in one measurement window is
/// meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(pub u32);

impl Timestamp {
    /// Sample the cycle counter
    #[inline]
    pub fn sample<B: PerfCounters + ?Sized>(bank: &B) -> Self {
        Self(bank.cycles())
    }
}

/// Elapsed ticks of one measurement window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ElapsedTicks(pub u32);

impl ElapsedTicks {
    /// Unsigned difference of two samples, divided down to ticks
    #[inline]
    pub const fn between(start: Timestamp, stop: Timestamp, divider: u32) -> Self {
        Self(stop.0.wrapping_sub(start.0) / divider)
    }

    /// Raw tick count
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Check for an empty window
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ElapsedTicks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seconds as an exact ratio of ticks to ticks-per-second
///
/// Needs no floating point; [`Seconds::as_f64`] gives a floating view where
/// one is available.
#[derive(Debug, Clone, Copy)]
pub struct Seconds {
    ticks: u64,
    ticks_per_second: NonZeroU32,
}

impl Seconds {
    /// Build from a tick count and a rate
    #[inline]
    pub const fn new(ticks: u64, ticks_per_second: NonZeroU32) -> Self {
        Self {
            ticks,
            ticks_per_second,
        }
    }

    /// Numerator
    #[inline]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Denominator
    #[inline]
    pub const fn ticks_per_second(&self) -> NonZeroU32 {
        self.ticks_per_second
    }

    /// Whole seconds, truncated
    #[inline]
    pub const fn whole(&self) -> u64 {
        self.ticks / self.ticks_per_second.get() as u64
    }

    /// Floating-point value
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.ticks as f64 / f64::from(self.ticks_per_second.get())
    }
}

impl PartialEq for Seconds {
    fn eq(&self, other: &Self) -> bool {
        u128::from(self.ticks) * u128::from(other.ticks_per_second.get())
            == u128::from(other.ticks) * u128::from(self.ticks_per_second.get())
    }
}

impl Eq for Seconds {}

impl Mul<u32> for Seconds {
    type Output = Seconds;

    fn mul(self, rhs: u32) -> Seconds {
        Seconds::new(self.ticks * u64::from(rhs), self.ticks_per_second)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.as_f64())
    }
}

/// Convert ticks to seconds
#[inline]
pub const fn time_in_secs(ticks: ElapsedTicks, ticks_per_second: NonZeroU32) -> Seconds {
    Seconds::new(ticks.0 as u64, ticks_per_second)
}

// =============================================================================
// Timing Source
// =============================================================================

/// Start/stop slots of one measurement window
#[derive(Debug, Clone, Copy)]
pub struct TimingSource {
    start: Timestamp,
    stop: Timestamp,
    divider: u32,
}

impl TimingSource {
    /// Create a timing source applying `divider` to raw cycle deltas
    pub const fn new(divider: u32) -> Self {
        Self {
            start: Timestamp(0),
            stop: Timestamp(0),
            divider,
        }
    }

    /// Open the window: zero the counter bank and sample the start time
    pub fn start<B: PerfCounters + ?Sized>(&mut self, bank: &mut B) {
        pcount::enable_counters(bank, false);
        pcount::reset_counters(bank);
        pcount::enable_counters(bank, true);
        self.start = Timestamp::sample(bank);
    }

    /// Close the window: sample the stop time and freeze the counter bank
    pub fn stop<B: PerfCounters + ?Sized>(&mut self, bank: &mut B) {
        self.stop = Timestamp::sample(bank);
        pcount::enable_counters(bank, false);
    }

    /// Ticks between the last start and stop
    ///
    /// Unspecified if `stop` has not been called since `start`.
    #[inline]
    pub const fn elapsed(&self) -> ElapsedTicks {
        ElapsedTicks::between(self.start, self.stop, self.divider)
    }

    /// Start sample
    pub const fn start_stamp(&self) -> Timestamp {
        self.start
    }

    /// Stop sample
    pub const fn stop_stamp(&self) -> Timestamp {
        self.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TICK_RATE;
    use ibex_hal::{HpmCounter, SimCore};

    fn rate(ticks_per_second: u32) -> NonZeroU32 {
        NonZeroU32::new(ticks_per_second).unwrap()
    }

    #[test]
    fn test_one_second_window() {
        let secs = time_in_secs(ElapsedTicks(500_000), TICK_RATE);
        assert_eq!(secs.as_f64(), 1.0);
        assert_eq!(secs.whole(), 1);
        assert_eq!(secs, Seconds::new(1, rate(1)));
    }

    #[test]
    fn test_time_in_secs_is_linear() {
        for t in [0u32, 1, 7, 250_000, 1_000_003, u32::MAX / 2] {
            let single = time_in_secs(ElapsedTicks(t), TICK_RATE);
            let double = time_in_secs(ElapsedTicks(t * 2), TICK_RATE);
            assert_eq!(double, single * 2);
        }
    }

    #[test]
    fn test_seconds_display() {
        assert_eq!(time_in_secs(ElapsedTicks(750_000), TICK_RATE).to_string(), "1.500000");
    }

    #[test]
    fn test_slowest_rate_is_whole_ticks() {
        let secs = time_in_secs(ElapsedTicks(5), rate(1));
        assert_eq!(secs.whole(), 5);
        assert_eq!(secs.ticks_per_second().get(), 1);
        assert_ne!(secs, Seconds::new(0, rate(1)));
    }

    #[test]
    fn test_elapsed_is_difference_of_samples() {
        let mut core = SimCore::new();
        core.step(1234);
        let mut timing = TimingSource::new(1);

        timing.start(&mut core);
        assert_eq!(timing.start_stamp(), Timestamp(0));
        core.step(4000);
        timing.stop(&mut core);
        core.step(99);

        assert_eq!(timing.elapsed(), ElapsedTicks(4000));
        assert_eq!(
            timing.elapsed().get(),
            timing.stop_stamp().0 - timing.start_stamp().0
        );
        assert_eq!(timing.elapsed(), timing.elapsed());
    }

    #[test]
    fn test_start_zeroes_event_counters() {
        let mut core = SimCore::new();
        core.record(HpmCounter::Mhpmcounter7, 55);
        let mut timing = TimingSource::new(1);
        timing.start(&mut core);
        assert!(core.is_enabled());
        assert_eq!(core.read(HpmCounter::Mhpmcounter7), 0);
    }

    #[test]
    fn test_stop_freezes_counters() {
        let mut core = SimCore::new();
        let mut timing = TimingSource::new(1);
        timing.start(&mut core);
        core.step(10);
        timing.stop(&mut core);
        assert!(!core.is_enabled());
        core.step(10);
        assert_eq!(core.cycles(), 10);
    }

    #[test]
    fn test_wrapping_difference() {
        let ticks = ElapsedTicks::between(Timestamp(u32::MAX - 9), Timestamp(10), 1);
        assert_eq!(ticks, ElapsedTicks(20));
    }

    #[test]
    fn test_divider() {
        let ticks = ElapsedTicks::between(Timestamp(100), Timestamp(1100), 4);
        assert_eq!(ticks, ElapsedTicks(250));
    }
}
