//! # Port Configuration
//!
//! Compile-time constants and the [`PortConfig`] a session is built from.
//!
//! | Constant            | Default   | Override                          |
//! |---------------------|-----------|-----------------------------------|
//! | `CLOCKS_PER_SEC`    | 500000    | [`PortConfig::with_clock`]        |
//! | `TIMER_RES_DIVIDER` | 1         | [`PortConfig::with_clock`]        |
//! | `ITERATIONS`        | 10        | `COREMARK_ITERATIONS` at build    |
//! | counter dump        | on        | `suppress-pcount-dump` feature    |
//! | run profile         | perf      | `validation-run` / `profile-run`  |

use core::num::NonZeroU32;

use crate::error::{PortError, PortResult};

// =============================================================================
// Constants
// =============================================================================

/// Cycle counter frequency of the simple system
pub const CLOCKS_PER_SEC: u32 = 500_000;

/// Divider trading timer resolution for measurable window length
pub const TIMER_RES_DIVIDER: u32 = 1;

/// Ticks per second after the resolution divider
pub const TICKS_PER_SEC: u32 = CLOCKS_PER_SEC / TIMER_RES_DIVIDER;

/// [`TICKS_PER_SEC`] as a tick rate
pub const TICK_RATE: NonZeroU32 = match NonZeroU32::new(TICKS_PER_SEC) {
    Some(rate) => rate,
    None => panic!("TICKS_PER_SEC must be non-zero"),
};

/// Benchmark iteration count
pub const ITERATIONS: u32 = match option_env!("COREMARK_ITERATIONS") {
    Some(value) => parse_u32(value),
    None => 10,
};

/// Number of benchmark contexts run in parallel
pub const DEFAULT_NUM_CONTEXTS: u32 = 1;

/// Parse a decimal `u32` at compile time
const fn parse_u32(text: &str) -> u32 {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        panic!("COREMARK_ITERATIONS is empty");
    }
    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        if !digit.is_ascii_digit() {
            panic!("COREMARK_ITERATIONS must be a decimal number");
        }
        value = match value.checked_mul(10) {
            Some(v) => match v.checked_add((digit - b'0') as u32) {
                Some(v) => v,
                None => panic!("COREMARK_ITERATIONS overflows u32"),
            },
            None => panic!("COREMARK_ITERATIONS overflows u32"),
        };
        i += 1;
    }
    value
}

// =============================================================================
// Run Profiles
// =============================================================================

/// Which seed set the benchmark runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunProfile {
    /// Known-answer validation run
    Validation,
    /// Scored performance run
    Performance,
    /// Profiling run
    Profile,
}

impl RunProfile {
    /// Profile selected by cargo features
    pub const DEFAULT: Self = if cfg!(feature = "validation-run") {
        RunProfile::Validation
    } else if cfg!(feature = "profile-run") {
        RunProfile::Profile
    } else {
        RunProfile::Performance
    };

    /// First three workload seeds
    pub const fn base_seeds(self) -> (i32, i32, i32) {
        match self {
            RunProfile::Validation => (0x3415, 0x3415, 0x66),
            RunProfile::Performance => (0x0, 0x0, 0x66),
            RunProfile::Profile => (0x8, 0x8, 0x8),
        }
    }
}

/// Seeds handed to the workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeds {
    /// List/matrix seed
    pub seed1: i32,
    /// List/matrix seed
    pub seed2: i32,
    /// State machine seed
    pub seed3: i32,
    /// Iteration count
    pub seed4: i32,
    /// Execution mask override (0 = all algorithms)
    pub seed5: i32,
}

// =============================================================================
// Configuration
// =============================================================================

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig {
    /// Benchmark iterations the score is normalized by
    pub iterations: u32,
    /// Cycle counter frequency
    pub clocks_per_sec: u32,
    /// Resolution divider applied to raw cycle deltas
    pub timer_res_divider: u32,
    /// Print the performance counter report at finalize
    pub dump_counters: bool,
    /// Seed set
    pub profile: RunProfile,
}

impl PortConfig {
    /// Configuration from the compile-time constants and features
    pub const fn new() -> Self {
        Self {
            iterations: ITERATIONS,
            clocks_per_sec: CLOCKS_PER_SEC,
            timer_res_divider: TIMER_RES_DIVIDER,
            dump_counters: !cfg!(feature = "suppress-pcount-dump"),
            profile: RunProfile::DEFAULT,
        }
    }

    /// Override the iteration count
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Override the clock frequency and resolution divider
    pub const fn with_clock(mut self, clocks_per_sec: u32, timer_res_divider: u32) -> Self {
        self.clocks_per_sec = clocks_per_sec;
        self.timer_res_divider = timer_res_divider;
        self
    }

    /// Enable or suppress the counter report
    pub const fn with_counter_dump(mut self, dump: bool) -> Self {
        self.dump_counters = dump;
        self
    }

    /// Select the seed set
    pub const fn with_profile(mut self, profile: RunProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Ticks per second after the resolution divider
    ///
    /// Only meaningful on a validated configuration.
    pub const fn ticks_per_second(&self) -> u32 {
        self.clocks_per_sec / self.timer_res_divider
    }

    /// Validated tick rate
    pub fn tick_rate(&self) -> PortResult<NonZeroU32> {
        self.validate()?;
        NonZeroU32::new(self.ticks_per_second()).ok_or(PortError::InvalidConfig {
            param: "clocks_per_sec",
            reason: "must be non-zero",
        })
    }

    /// Workload seeds for this configuration
    ///
    /// Values pass through [`core::hint::black_box`] so the workload cannot
    /// fold them into constants.
    pub fn seeds(&self) -> Seeds {
        let (seed1, seed2, seed3) = self.profile.base_seeds();
        core::hint::black_box(Seeds {
            seed1,
            seed2,
            seed3,
            seed4: self.iterations as i32,
            seed5: 0,
        })
    }

    /// Check the configuration
    pub fn validate(&self) -> PortResult<()> {
        if self.clocks_per_sec == 0 {
            return Err(PortError::InvalidConfig {
                param: "clocks_per_sec",
                reason: "must be non-zero",
            });
        }
        if self.timer_res_divider == 0 {
            return Err(PortError::InvalidConfig {
                param: "timer_res_divider",
                reason: "must be non-zero",
            });
        }
        if self.timer_res_divider > self.clocks_per_sec {
            return Err(PortError::InvalidConfig {
                param: "timer_res_divider",
                reason: "must not exceed clocks_per_sec",
            });
        }
        Ok(())
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ticks_per_second() {
        let config = PortConfig::new();
        assert_eq!(config.ticks_per_second(), TICKS_PER_SEC);
        assert_eq!(config.tick_rate(), Ok(TICK_RATE));
    }

    #[test]
    fn test_parse_u32() {
        assert_eq!(parse_u32("0"), 0);
        assert_eq!(parse_u32("2000000"), 2_000_000);
        assert_eq!(parse_u32("4294967295"), u32::MAX);
    }

    #[test]
    fn test_divider_applied() {
        let config = PortConfig::new().with_clock(1_000_000, 4);
        assert_eq!(config.ticks_per_second(), 250_000);
    }

    #[test]
    fn test_rejects_zero_divider() {
        let config = PortConfig::new().with_clock(500_000, 0);
        assert_eq!(
            config.validate(),
            Err(PortError::InvalidConfig {
                param: "timer_res_divider",
                reason: "must be non-zero",
            })
        );
    }

    #[test]
    fn test_rejects_oversized_divider() {
        let config = PortConfig::new().with_clock(10, 11);
        assert!(config.validate().is_err());
        assert!(PortConfig::new().with_clock(0, 1).validate().is_err());
    }

    #[test]
    fn test_tick_rate_rejects_zero_clock() {
        assert_eq!(
            PortConfig::new().with_clock(0, 1).tick_rate(),
            Err(PortError::InvalidConfig {
                param: "clocks_per_sec",
                reason: "must be non-zero",
            })
        );
        assert_eq!(
            PortConfig::new().with_clock(1_000_000, 4).tick_rate().map(NonZeroU32::get),
            Ok(250_000)
        );
    }

    #[test]
    fn test_seeds_follow_profile() {
        let config = PortConfig::new()
            .with_iterations(2000)
            .with_profile(RunProfile::Validation);
        assert_eq!(
            config.seeds(),
            Seeds {
                seed1: 0x3415,
                seed2: 0x3415,
                seed3: 0x66,
                seed4: 2000,
                seed5: 0,
            }
        );

        let perf = config.with_profile(RunProfile::Performance).seeds();
        assert_eq!((perf.seed1, perf.seed2, perf.seed3), (0, 0, 0x66));

        let profile = config.with_profile(RunProfile::Profile).seeds();
        assert_eq!((profile.seed1, profile.seed2, profile.seed3), (8, 8, 8));
    }
}
