//! # Architecture Support
//!
//! Register-level backends for the platform traits. Only the Ibex
//! (RV32) backend exists; other targets fall back to [`crate::SimCore`].

#[cfg(target_arch = "riscv32")]
pub mod riscv32;
