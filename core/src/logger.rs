//! # Console Logger
//!
//! Optional `log` backend writing `[LEVEL] target: message` lines to a
//! console. Without it, `log` records from the port are discarded.
//!
//! Only built where the target has compare-and-swap atomics. On cores
//! without them (`riscv32imc`) the port runs without a logger.

use core::fmt::{self, Write};

use ibex_hal::ConsoleWriter;
use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;

use crate::error::{PortError, PortResult};

/// Console the logger writes to
static SINK: Mutex<Option<&'static mut dyn ConsoleWriter>> = Mutex::new(None);

static LOGGER: ConsoleLogger = ConsoleLogger;

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = SINK.lock().as_mut() {
            let _ = writeln!(
                SinkAdapter(&mut **sink),
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Some(sink) = SINK.lock().as_mut() {
            sink.flush();
        }
    }
}

struct SinkAdapter<'a>(&'a mut dyn ConsoleWriter);

impl Write for SinkAdapter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        ConsoleWriter::write_str(self.0, s);
        Ok(())
    }
}

/// Install the console logger
///
/// Fails with [`PortError::LoggerAlreadySet`] if any logger is installed.
pub fn init(sink: &'static mut dyn ConsoleWriter, level: LevelFilter) -> PortResult<()> {
    log::set_logger(&LOGGER).map_err(|_| PortError::LoggerAlreadySet)?;
    *SINK.lock() = Some(sink);
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    static TAP: Mutex<String> = Mutex::new(String::new());

    struct Tap;

    impl ConsoleWriter for Tap {
        fn write_byte(&mut self, byte: u8) {
            TAP.lock().push(byte as char);
        }
    }

    #[test]
    fn test_logs_to_console_once() {
        let sink: &'static mut Tap = Box::leak(Box::new(Tap));
        init(sink, LevelFilter::Info).unwrap();

        log::info!(target: "port", "platform init");
        log::debug!(target: "port", "filtered out");
        {
            let captured = TAP.lock();
            assert!(captured.contains("[INFO] port: platform init\n"));
            assert!(!captured.contains("filtered out"));
        }

        let again: &'static mut Tap = Box::leak(Box::new(Tap));
        assert_eq!(init(again, LevelFilter::Info), Err(PortError::LoggerAlreadySet));
    }
}
