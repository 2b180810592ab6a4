//! # Hardware Performance Counters
//!
//! Arch-neutral description of the RISC-V machine counter bank.
//!
//! ## Counter Layout
//!
//! ```text
//!   CSR     Name            Inhibit bit   Ibex event
//!   0xB00   mcycle          0  (CY)       clock cycles
//!   0xB02   minstret        2  (IR)       instructions retired
//!   0xB03   mhpmcounter3    3             LSU busy
//!   0xB04   mhpmcounter4    4             instruction fetch wait
//!   0xB05   mhpmcounter5    5             loads
//!   0xB06   mhpmcounter6    6             stores
//!   0xB07   mhpmcounter7    7             jumps
//!   0xB08   mhpmcounter8    8             conditional branches
//!   0xB09   mhpmcounter9    9             taken conditional branches
//!   0xB0A   mhpmcounter10   10            compressed instructions
//!   0xB0B   mhpmcounter11   11            multiply wait
//!   0xB0C   mhpmcounter12   12            divide wait
//! ```
//!
//! A counter only accumulates while its bit in `mcountinhibit` (0x320) is
//! clear.

use crate::types::CounterValue;

// ============================================================================
// Counter Registers
// ============================================================================

/// A counter register the port reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HpmCounter {
    /// Machine cycle counter
    Mcycle        = 0xB00,
    /// Machine instructions retired
    Minstret      = 0xB02,
    /// Hardware performance counter 3
    Mhpmcounter3  = 0xB03,
    /// Hardware performance counter 4
    Mhpmcounter4  = 0xB04,
    /// Hardware performance counter 5
    Mhpmcounter5  = 0xB05,
    /// Hardware performance counter 6
    Mhpmcounter6  = 0xB06,
    /// Hardware performance counter 7
    Mhpmcounter7  = 0xB07,
    /// Hardware performance counter 8
    Mhpmcounter8  = 0xB08,
    /// Hardware performance counter 9
    Mhpmcounter9  = 0xB09,
    /// Hardware performance counter 10
    Mhpmcounter10 = 0xB0A,
    /// Hardware performance counter 11
    Mhpmcounter11 = 0xB0B,
    /// Hardware performance counter 12
    Mhpmcounter12 = 0xB0C,
}

impl HpmCounter {
    /// Number of counter registers
    pub const COUNT: usize = 12;

    /// Every counter register, in CSR order
    pub const ALL: [HpmCounter; Self::COUNT] = [
        HpmCounter::Mcycle,
        HpmCounter::Minstret,
        HpmCounter::Mhpmcounter3,
        HpmCounter::Mhpmcounter4,
        HpmCounter::Mhpmcounter5,
        HpmCounter::Mhpmcounter6,
        HpmCounter::Mhpmcounter7,
        HpmCounter::Mhpmcounter8,
        HpmCounter::Mhpmcounter9,
        HpmCounter::Mhpmcounter10,
        HpmCounter::Mhpmcounter11,
        HpmCounter::Mhpmcounter12,
    ];

    /// CSR address of the low 32 bits
    #[inline]
    pub const fn csr(self) -> u16 {
        self as u16
    }

    /// CSR address of the high 32 bits (RV32 only)
    #[inline]
    pub const fn csr_high(self) -> u16 {
        self.csr() + 0x80
    }

    /// Bit position in `mcountinhibit`
    #[inline]
    pub const fn inhibit_bit(self) -> u32 {
        (self.csr() & 0x1F) as u32
    }

    /// Flag inhibiting this counter
    #[inline]
    pub const fn inhibit_flag(self) -> CountInhibit {
        CountInhibit::from_bits_retain(1 << self.inhibit_bit())
    }

    /// Dense index into [`HpmCounter::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            HpmCounter::Mcycle => 0,
            HpmCounter::Minstret => 1,
            other => (other.csr() - 0xB01) as usize,
        }
    }

    /// Assembler name of the register
    pub const fn name(self) -> &'static str {
        match self {
            HpmCounter::Mcycle => "mcycle",
            HpmCounter::Minstret => "minstret",
            HpmCounter::Mhpmcounter3 => "mhpmcounter3",
            HpmCounter::Mhpmcounter4 => "mhpmcounter4",
            HpmCounter::Mhpmcounter5 => "mhpmcounter5",
            HpmCounter::Mhpmcounter6 => "mhpmcounter6",
            HpmCounter::Mhpmcounter7 => "mhpmcounter7",
            HpmCounter::Mhpmcounter8 => "mhpmcounter8",
            HpmCounter::Mhpmcounter9 => "mhpmcounter9",
            HpmCounter::Mhpmcounter10 => "mhpmcounter10",
            HpmCounter::Mhpmcounter11 => "mhpmcounter11",
            HpmCounter::Mhpmcounter12 => "mhpmcounter12",
        }
    }
}

// ============================================================================
// Counter Inhibit Register
// ============================================================================

bitflags::bitflags! {
    /// `mcountinhibit` register (0x320)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CountInhibit: u32 {
        /// Inhibit `mcycle`
        const CY = 1 << 0;
        /// Inhibit `minstret`
        const IR = 1 << 2;
        /// Inhibit every `mhpmcounter3`..`mhpmcounter31`
        const HPM = !0b111;
    }
}

impl CountInhibit {
    /// Value written to freeze the whole bank
    pub const FREEZE_ALL: Self = Self::from_bits_retain(u32::MAX);
    /// Value written to let the whole bank count
    pub const RUN_ALL: Self = Self::empty();

    /// Check whether `counter` is frozen
    #[inline]
    pub const fn inhibits(self, counter: HpmCounter) -> bool {
        self.bits() & counter.inhibit_flag().bits() != 0
    }
}

// ============================================================================
// Platform Traits
// ============================================================================

/// Bank of hardware event counters
///
/// Implementations are expected to be cheap, synchronous register accesses.
pub trait PerfCounters {
    /// Let every counter (cycle counter included) accumulate, or freeze them
    fn set_enabled(&mut self, enabled: bool);

    /// Check whether the bank is currently accumulating
    fn is_enabled(&self) -> bool;

    /// Zero every counter
    ///
    /// Should only be called while the bank is disabled, otherwise an
    /// increment racing with the reset may be lost or kept.
    fn reset(&mut self);

    /// Read the low 32 bits of a counter
    fn read(&self, counter: HpmCounter) -> CounterValue;

    /// Read the cycle counter
    #[inline]
    fn cycles(&self) -> CounterValue {
        self.read(HpmCounter::Mcycle)
    }
}

/// Instruction cache control
pub trait InstructionCache {
    /// Enable or disable instruction caching
    fn set_icache(&mut self, enabled: bool);

    /// Check whether instruction caching is enabled
    fn icache_enabled(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_dense() {
        for (i, counter) in HpmCounter::ALL.iter().enumerate() {
            assert_eq!(counter.index(), i);
        }
    }

    #[test]
    fn test_high_half_address() {
        assert_eq!(HpmCounter::Mcycle.csr_high(), 0xB80);
        assert_eq!(HpmCounter::Mhpmcounter12.csr_high(), 0xB8C);
    }

    #[test]
    fn test_inhibit_bits() {
        assert_eq!(HpmCounter::Mcycle.inhibit_flag(), CountInhibit::CY);
        assert_eq!(HpmCounter::Minstret.inhibit_flag(), CountInhibit::IR);
        assert!(CountInhibit::HPM.contains(HpmCounter::Mhpmcounter3.inhibit_flag()));
        assert!(!CountInhibit::HPM.contains(CountInhibit::IR));
    }

    #[test]
    fn test_freeze_all_covers_every_counter() {
        for counter in HpmCounter::ALL {
            assert!(CountInhibit::FREEZE_ALL.inhibits(counter));
            assert!(!CountInhibit::RUN_ALL.inhibits(counter));
        }
    }
}
