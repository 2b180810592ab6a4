//! # Platform Type Checks
//!
//! Advisory checks run by `portable_init`. A failed check prints a
//! diagnostic but never aborts the run.

use core::mem::size_of;

use heapless::Vec;

/// A platform type with the wrong width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthAdvisory {
    /// Pointer-sized integer cannot hold a pointer
    PointerInt,
    /// 32-bit unsigned type is not 4 bytes
    Word32,
}

impl WidthAdvisory {
    /// Diagnostic line printed at init
    pub const fn message(self) -> &'static str {
        match self {
            WidthAdvisory::PointerInt => {
                "ERROR! Please define PtrInt to a type that holds a pointer!"
            },
            WidthAdvisory::Word32 => "ERROR! Please define U32 to a 32b unsigned type!",
        }
    }
}

/// Check a pointer-sized integer `P` and a 32-bit unsigned `W`
pub fn check_widths<P, W>() -> Vec<WidthAdvisory, 2> {
    let mut advisories = Vec::new();
    if size_of::<P>() != size_of::<*const u8>() {
        let _ = advisories.push(WidthAdvisory::PointerInt);
    }
    if size_of::<W>() != 4 {
        let _ = advisories.push(WidthAdvisory::Word32);
    }
    advisories
}
