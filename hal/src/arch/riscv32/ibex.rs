//! # Ibex Counter Bank
//!
//! [`PerfCounters`] and [`InstructionCache`] backed by the real CSRs.

use core::sync::atomic::{AtomicBool, Ordering};

use super::{cache, csr};
use crate::counters::{CountInhibit, HpmCounter, InstructionCache, PerfCounters};
use crate::types::CounterValue;

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Handle to the hart's counter bank
///
/// Only one handle exists; obtain it with [`IbexCore::take`].
#[derive(Debug)]
pub struct IbexCore {
    _private: (),
}

impl IbexCore {
    /// Take the counter bank
    ///
    /// Returns `None` once the handle has been handed out.
    pub fn take() -> Option<Self> {
        // Single hart, and no AMOs without the A extension.
        if TAKEN.load(Ordering::Relaxed) {
            return None;
        }
        TAKEN.store(true, Ordering::Relaxed);
        log::debug!("ibex: counter bank taken");
        Some(Self { _private: () })
    }
}

impl PerfCounters for IbexCore {
    #[inline]
    fn set_enabled(&mut self, enabled: bool) {
        csr::write_mcountinhibit(if enabled {
            CountInhibit::RUN_ALL
        } else {
            CountInhibit::FREEZE_ALL
        });
    }

    #[inline]
    fn is_enabled(&self) -> bool {
        csr::read_mcountinhibit().is_empty()
    }

    #[inline]
    fn reset(&mut self) {
        csr::zero_counters();
    }

    #[inline]
    fn read(&self, counter: HpmCounter) -> CounterValue {
        csr::read_counter(counter)
    }
}

impl InstructionCache for IbexCore {
    fn set_icache(&mut self, enabled: bool) {
        cache::icache_enable(enabled);
    }

    fn icache_enabled(&self) -> bool {
        cache::read_cpuctrl().contains(cache::CpuCtrl::ICACHE_ENABLE)
    }
}
