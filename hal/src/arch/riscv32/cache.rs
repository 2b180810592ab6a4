//! # Ibex Cache Control
//!
//! Ibex exposes its instruction cache enable through the custom `cpuctrl`
//! CSR (0x7C0). The cache is off out of reset.

use core::arch::asm;

bitflags::bitflags! {
    /// Ibex `cpuctrl` register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CpuCtrl: u32 {
        /// Instruction cache enable
        const ICACHE_ENABLE = 1 << 0;
        /// Data-independent timing
        const DATA_IND_TIMING = 1 << 1;
        /// Dummy instruction insertion enable
        const DUMMY_INSTR_EN = 1 << 2;
        /// Dummy instruction frequency mask (3 bits)
        const DUMMY_INSTR_MASK = 0b111 << 3;
        /// Synchronous exception seen (read-only)
        const SYNC_EXC_SEEN = 1 << 6;
        /// Double fault seen (read-only)
        const DOUBLE_FAULT_SEEN = 1 << 7;
    }
}

/// Read `cpuctrl`
#[inline]
pub fn read_cpuctrl() -> CpuCtrl {
    CpuCtrl::from_bits_retain(crate::read_csr!(0x7C0) as u32)
}

/// Enable or disable the instruction cache
#[inline]
pub fn icache_enable(enable: bool) {
    if enable {
        crate::set_csr_bits!(0x7C0, CpuCtrl::ICACHE_ENABLE.bits());
    } else {
        crate::clear_csr_bits!(0x7C0, CpuCtrl::ICACHE_ENABLE.bits());
        fence_i();
    }
}

/// Execute FENCE.I
///
/// Synchronizes the instruction and data streams.
#[inline]
pub fn fence_i() {
    unsafe {
        asm!("fence.i", options(nostack, preserves_flags));
    }
}
