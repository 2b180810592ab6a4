//! # RISC-V 32-bit (Ibex) HAL Implementation
//!
//! ## Module Organization
//!
//! - [`csr`]: counter CSR addresses and access macros
//! - [`cache`]: Ibex `cpuctrl` register and instruction cache control
//! - [`ibex`]: [`IbexCore`], the CSR-backed counter bank
//! - [`simctrl`]: simple-system character output console

pub mod cache;
pub mod csr;
pub mod ibex;
pub mod simctrl;

pub use ibex::IbexCore;
pub use simctrl::SimCtrlConsole;
