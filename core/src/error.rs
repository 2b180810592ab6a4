//! # Error Types
//!
//! Errors surfaced by the port layer. Protocol misuse (calling operations
//! out of order) is not an error kind: it yields unspecified values.

use core::fmt;

/// Result type for port operations
pub type PortResult<T> = Result<T, PortError>;

/// Port error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortError {
    /// Zero ticks elapsed between `start_time` and `stop_time`
    MeasurementWindowTooShort,
    /// Invalid configuration constant
    InvalidConfig {
        /// The name of the invalid parameter
        param: &'static str,
        /// The reason why the parameter is invalid
        reason: &'static str,
    },
    /// A global logger was already installed
    LoggerAlreadySet,
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeasurementWindowTooShort => {
                write!(f, "Measurement window too short: zero ticks elapsed")
            },
            Self::InvalidConfig { param, reason } => {
                write!(f, "Invalid configuration '{param}': {reason}")
            },
            Self::LoggerAlreadySet => write!(f, "Logger already set"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PortError::InvalidConfig {
            param: "timer_res_divider",
            reason: "must be non-zero",
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration 'timer_res_divider': must be non-zero"
        );
        assert_eq!(
            PortError::MeasurementWindowTooShort.to_string(),
            "Measurement window too short: zero ticks elapsed"
        );
    }
}
