//! # Ibex Hardware Abstraction Layer
//!
//! Platform primitives consumed by the CoreMark port layer:
//!
//! - **Counters**: the machine-mode counter CSRs (`mcycle`, `minstret`,
//!   `mhpmcounter3`..) behind the [`PerfCounters`] trait
//! - **Cache**: the Ibex `cpuctrl` instruction cache enable behind
//!   [`InstructionCache`]
//! - **Console**: a byte-oriented output sink behind [`ConsoleWriter`]
//!
//! On `riscv32` targets the traits are backed by real CSR accesses
//! (`arch::riscv32::IbexCore`). Every other target gets [`SimCore`], a
//! software model with the same inhibit and reset semantics.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod arch;
pub mod console;
pub mod counters;
pub mod sim;
pub mod types;

pub use console::{BufferConsole, ConsoleWriter};
pub use counters::{CountInhibit, HpmCounter, InstructionCache, PerfCounters};
pub use sim::SimCore;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "riscv32")] {
        /// Counter bank of the core this crate was built for
        pub type Native = arch::riscv32::IbexCore;
    } else {
        /// Counter bank of the core this crate was built for
        pub type Native = SimCore;
    }
}
