//! # RISC-V Counter Control and Status Registers
//!
//! CSR access for the RV32 machine counter bank.
//!
//! CSR numbers are encoded in the instruction, so every access goes through
//! a macro taking a literal address. Runtime dispatch over
//! [`HpmCounter`] happens in [`read_counter`].

use crate::counters::{CountInhibit, HpmCounter};

// ============================================================================
// CSR Address Constants
// ============================================================================

/// Machine counter-inhibit register
pub const MCOUNTINHIBIT: u16 = 0x320;
/// Machine cycle counter (low)
pub const MCYCLE: u16 = 0xB00;
/// Machine instructions retired (low)
pub const MINSTRET: u16 = 0xB02;
/// First hardware performance counter (low)
pub const MHPMCOUNTER3: u16 = 0xB03;
/// Machine cycle counter (high)
pub const MCYCLEH: u16 = 0xB80;
/// Machine instructions retired (high)
pub const MINSTRETH: u16 = 0xB82;
/// Ibex CPU control register (custom)
pub const CPUCTRL: u16 = 0x7C0;

// The access macros take literals; keep them in step with `HpmCounter`.
static_assertions::const_assert_eq!(HpmCounter::Mcycle.csr(), MCYCLE);
static_assertions::const_assert_eq!(HpmCounter::Minstret.csr(), MINSTRET);
static_assertions::const_assert_eq!(HpmCounter::Mhpmcounter3.csr(), MHPMCOUNTER3);
static_assertions::const_assert_eq!(HpmCounter::Mcycle.csr_high(), MCYCLEH);
static_assertions::const_assert_eq!(HpmCounter::Minstret.csr_high(), MINSTRETH);

// ============================================================================
// CSR Read/Write Macros
// ============================================================================

/// Read a CSR by address
#[macro_export]
macro_rules! read_csr {
    ($csr:literal) => {{
        let value: usize;
        unsafe {
            core::arch::asm!(
                concat!("csrr {}, ", stringify!($csr)),
                out(reg) value,
                options(nomem, nostack, preserves_flags)
            );
        }
        value
    }};
}

/// Write a CSR by address
#[macro_export]
macro_rules! write_csr {
    ($csr:literal, $value:expr) => {{
        unsafe {
            core::arch::asm!(
                concat!("csrw ", stringify!($csr), ", {}"),
                in(reg) $value as usize,
                options(nomem, nostack)
            );
        }
    }};
}

/// Set bits in a CSR
#[macro_export]
macro_rules! set_csr_bits {
    ($csr:literal, $bits:expr) => {{
        unsafe {
            core::arch::asm!(
                concat!("csrs ", stringify!($csr), ", {}"),
                in(reg) $bits as usize,
                options(nomem, nostack)
            );
        }
    }};
}

/// Clear bits in a CSR
#[macro_export]
macro_rules! clear_csr_bits {
    ($csr:literal, $bits:expr) => {{
        unsafe {
            core::arch::asm!(
                concat!("csrc ", stringify!($csr), ", {}"),
                in(reg) $bits as usize,
                options(nomem, nostack)
            );
        }
    }};
}

/// Write zero to a list of CSRs back-to-back
macro_rules! zero_csrs {
    ($($csr:literal),+ $(,)?) => {{
        unsafe {
            core::arch::asm!(
                $(concat!("csrw ", stringify!($csr), ", x0"),)+
                options(nomem, nostack)
            );
        }
    }};
}

// ============================================================================
// Counter Access
// ============================================================================

/// Read the low 32 bits of a counter
#[inline]
pub fn read_counter(counter: HpmCounter) -> u32 {
    let value = match counter {
        HpmCounter::Mcycle => crate::read_csr!(0xB00),
        HpmCounter::Minstret => crate::read_csr!(0xB02),
        HpmCounter::Mhpmcounter3 => crate::read_csr!(0xB03),
        HpmCounter::Mhpmcounter4 => crate::read_csr!(0xB04),
        HpmCounter::Mhpmcounter5 => crate::read_csr!(0xB05),
        HpmCounter::Mhpmcounter6 => crate::read_csr!(0xB06),
        HpmCounter::Mhpmcounter7 => crate::read_csr!(0xB07),
        HpmCounter::Mhpmcounter8 => crate::read_csr!(0xB08),
        HpmCounter::Mhpmcounter9 => crate::read_csr!(0xB09),
        HpmCounter::Mhpmcounter10 => crate::read_csr!(0xB0A),
        HpmCounter::Mhpmcounter11 => crate::read_csr!(0xB0B),
        HpmCounter::Mhpmcounter12 => crate::read_csr!(0xB0C),
    };
    value as u32
}

/// Read `mcountinhibit`
#[inline]
pub fn read_mcountinhibit() -> CountInhibit {
    CountInhibit::from_bits_retain(crate::read_csr!(0x320) as u32)
}

/// Write `mcountinhibit`
#[inline]
pub fn write_mcountinhibit(value: CountInhibit) {
    crate::write_csr!(0x320, value.bits());
}

/// Zero both halves of `mcycle`, `minstret` and `mhpmcounter3`..`31`
#[inline]
pub fn zero_counters() {
    zero_csrs!(
        0xB02, 0xB00, 0xB03, 0xB04, 0xB05, 0xB06, 0xB07, 0xB08, 0xB09, 0xB0A,
        0xB0B, 0xB0C, 0xB0D, 0xB0E, 0xB0F, 0xB10, 0xB11, 0xB12, 0xB13, 0xB14,
        0xB15, 0xB16, 0xB17, 0xB18, 0xB19, 0xB1A, 0xB1B, 0xB1C, 0xB1D, 0xB1E,
        0xB1F,
    );
    zero_csrs!(
        0xB82, 0xB80, 0xB83, 0xB84, 0xB85, 0xB86, 0xB87, 0xB88, 0xB89, 0xB8A,
        0xB8B, 0xB8C, 0xB8D, 0xB8E, 0xB8F, 0xB90, 0xB91, 0xB92, 0xB93, 0xB94,
        0xB95, 0xB96, 0xB97, 0xB98, 0xB99, 0xB9A, 0xB9B, 0xB9C, 0xB9D, 0xB9E,
        0xB9F,
    );
}
