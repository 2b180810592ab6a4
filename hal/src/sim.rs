//! # Simulated Counter Bank
//!
//! Software model of the Ibex counter bank for hosts without the CSRs.
//! It follows the hardware rules: counters only move while their
//! `mcountinhibit` bit is clear, and values wrap at 32 bits.

use crate::counters::{CountInhibit, HpmCounter, InstructionCache, PerfCounters};
use crate::types::CounterValue;

/// Software counter bank
#[derive(Debug, Clone)]
pub struct SimCore {
    counters: [CounterValue; HpmCounter::COUNT],
    inhibit: CountInhibit,
    icache: bool,
}

impl SimCore {
    /// Create a bank in its reset state: all zero, counting, cache off
    pub const fn new() -> Self {
        Self {
            counters: [0; HpmCounter::COUNT],
            inhibit: CountInhibit::RUN_ALL,
            icache: false,
        }
    }

    /// Advance the cycle counter by `cycles`
    pub fn step(&mut self, cycles: u32) {
        self.record(HpmCounter::Mcycle, cycles);
    }

    /// Count `events` occurrences on `counter`
    ///
    /// Dropped if the counter is currently inhibited.
    pub fn record(&mut self, counter: HpmCounter, events: u32) {
        if self.inhibit.inhibits(counter) {
            return;
        }
        let slot = &mut self.counters[counter.index()];
        *slot = slot.wrapping_add(events);
    }

    /// Overwrite a counter, bypassing the inhibit register
    pub fn preload(&mut self, counter: HpmCounter, value: CounterValue) {
        self.counters[counter.index()] = value;
    }

    /// Current `mcountinhibit` value
    pub fn inhibit(&self) -> CountInhibit {
        self.inhibit
    }
}

impl Default for SimCore {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfCounters for SimCore {
    fn set_enabled(&mut self, enabled: bool) {
        log::trace!("sim: counters {}", if enabled { "running" } else { "frozen" });
        self.inhibit = if enabled {
            CountInhibit::RUN_ALL
        } else {
            CountInhibit::FREEZE_ALL
        };
    }

    fn is_enabled(&self) -> bool {
        self.inhibit.is_empty()
    }

    fn reset(&mut self) {
        self.counters = [0; HpmCounter::COUNT];
    }

    fn read(&self, counter: HpmCounter) -> CounterValue {
        self.counters[counter.index()]
    }
}

impl InstructionCache for SimCore {
    fn set_icache(&mut self, enabled: bool) {
        self.icache = enabled;
    }

    fn icache_enabled(&self) -> bool {
        self.icache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_while_enabled() {
        let mut core = SimCore::new();
        core.step(10);
        core.record(HpmCounter::Mhpmcounter5, 3);
        assert_eq!(core.cycles(), 10);
        assert_eq!(core.read(HpmCounter::Mhpmcounter5), 3);
    }

    #[test]
    fn test_frozen_while_disabled() {
        let mut core = SimCore::new();
        core.step(5);
        core.set_enabled(false);
        assert!(!core.is_enabled());
        core.step(100);
        core.record(HpmCounter::Minstret, 100);
        assert_eq!(core.cycles(), 5);
        assert_eq!(core.read(HpmCounter::Minstret), 0);
    }

    #[test]
    fn test_reset_clears_every_counter() {
        let mut core = SimCore::new();
        for counter in HpmCounter::ALL {
            core.record(counter, 7);
        }
        core.set_enabled(false);
        core.reset();
        for counter in HpmCounter::ALL {
            assert_eq!(core.read(counter), 0);
        }
    }

    #[test]
    fn test_wraps_at_32_bits() {
        let mut core = SimCore::new();
        core.preload(HpmCounter::Mcycle, u32::MAX);
        core.step(2);
        assert_eq!(core.cycles(), 1);
    }

    #[test]
    fn test_icache_flag() {
        let mut core = SimCore::new();
        assert!(!core.icache_enabled());
        core.set_icache(true);
        assert!(core.icache_enabled());
    }
}
