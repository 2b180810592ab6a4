//! # Simple-System Console
//!
//! The Ibex simple system maps a simulator control block at `0x20000`.
//! Each byte stored to its output register is echoed to the simulator log.

use crate::console::ConsoleWriter;

/// Default base of the simulator control block
pub const SIM_CTRL_BASE: usize = 0x2_0000;
/// Character output register offset
pub const SIM_CTRL_OUT: usize = 0x0;
/// Halt register offset
pub const SIM_CTRL_CTRL: usize = 0x8;

/// Console writing through the simulator control block
#[derive(Debug)]
pub struct SimCtrlConsole {
    base: usize,
}

impl SimCtrlConsole {
    /// Create a console for the control block at `base`
    ///
    /// # Safety
    /// `base` must point at a simulator control block mapped for writes.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Ask the simulator to stop
    pub fn halt(&mut self) {
        // SAFETY: `new` requires a mapped control block
        unsafe {
            core::ptr::write_volatile((self.base + SIM_CTRL_CTRL) as *mut u32, 1);
        }
    }
}

impl ConsoleWriter for SimCtrlConsole {
    fn write_byte(&mut self, byte: u8) {
        // SAFETY: `new` requires a mapped control block
        unsafe {
            core::ptr::write_volatile((self.base + SIM_CTRL_OUT) as *mut u32, u32::from(byte));
        }
    }
}
