//! # Console Output
//!
//! Line-oriented text sink used for the benchmark report.

use core::fmt::{self, Write};

/// Console writer trait
pub trait ConsoleWriter: Send {
    /// Write a byte to the console
    fn write_byte(&mut self, byte: u8);

    /// Write a string to the console
    fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
    }

    /// Flush the console
    fn flush(&mut self) {}
}

/// Null console (discards output)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullConsole;

impl ConsoleWriter for NullConsole {
    fn write_byte(&mut self, _byte: u8) {}
}

/// Print formatted output to a console
pub fn print(console: &mut dyn ConsoleWriter, args: fmt::Arguments<'_>) {
    let _ = ConsoleWriteAdapter(console).write_fmt(args);
}

/// Wrapper to implement `fmt::Write` for a `ConsoleWriter` reference
struct ConsoleWriteAdapter<'a>(&'a mut dyn ConsoleWriter);

impl Write for ConsoleWriteAdapter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        ConsoleWriter::write_str(self.0, s);
        Ok(())
    }
}

// ============================================================================
// Buffer Console
// ============================================================================

/// Console capturing output into a fixed-capacity buffer
///
/// Output fills the buffer up to its capacity; the bytes past it are
/// dropped and [`BufferConsole::overflowed`] reports it.
#[derive(Debug, Default)]
pub struct BufferConsole<const N: usize> {
    buffer: heapless::String<N>,
    overflowed: bool,
}

impl<const N: usize> BufferConsole<N> {
    /// Create an empty console
    pub const fn new() -> Self {
        Self {
            buffer: heapless::String::new(),
            overflowed: false,
        }
    }

    /// Everything written so far
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    /// Check whether output was dropped
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Discard captured output
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }
}

impl<const N: usize> ConsoleWriter for BufferConsole<N> {
    fn write_byte(&mut self, byte: u8) {
        let ch = if byte.is_ascii() { byte as char } else { '?' };
        if self.buffer.push(ch).is_err() {
            self.overflowed = true;
        }
    }

    fn write_str(&mut self, s: &str) {
        if self.buffer.push_str(s).is_err() {
            for byte in s.bytes() {
                self.write_byte(byte);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_formats_into_buffer() {
        let mut console = BufferConsole::<64>::new();
        print(&mut console, format_args!("{}: {}\n", "Loads", 42));
        assert_eq!(console.as_str(), "Loads: 42\n");
        assert!(!console.overflowed());
    }

    #[test]
    fn test_overflow_is_flagged() {
        let mut console = BufferConsole::<4>::new();
        ConsoleWriter::write_str(&mut console, "abcdef");
        assert!(console.overflowed());
        assert_eq!(console.as_str(), "abcd");
        console.clear();
        assert_eq!(console.as_str(), "");
        assert!(!console.overflowed());
    }

    #[test]
    fn test_partial_line_kept_on_overflow() {
        let mut console = BufferConsole::<12>::new();
        ConsoleWriter::write_str(&mut console, "Loads: 7\n");
        print(&mut console, format_args!("{}: {}\n", "Stores", 12));
        assert_eq!(console.as_str(), "Loads: 7\nSto");
        assert!(console.overflowed());
    }
}
