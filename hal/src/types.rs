//! # Platform Integer Types
//!
//! The port expects a pointer-sized integer and an exact 32-bit unsigned
//! integer. Both are checked (advisory only) when the platform is
//! initialized.

/// Integer type able to hold any data pointer
pub type PtrInt = usize;

/// Exact 32-bit unsigned integer
pub type U32 = u32;

/// Unsigned counter value as read from a single counter CSR
pub type CounterValue = u32;

static_assertions::const_assert_eq!(core::mem::size_of::<CounterValue>(), 4);
