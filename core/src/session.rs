//! # Benchmark Session
//!
//! One CoreMark run on one hart. The session owns the counter bank, the
//! console and the timing slots, and is driven through the port protocol:
//!
//! ```text
//!   portable_init ─▶ start_time ─▶ [workload] ─▶ stop_time ─▶ portable_fini
//! ```
//!
//! Calling the operations out of order is not detected; the values returned
//! are then unspecified.

use core::num::NonZeroU32;

use ibex_hal::console::{self, ConsoleWriter};
use ibex_hal::types::{PtrInt, U32};
use ibex_hal::{InstructionCache, PerfCounters};

use crate::config::{PortConfig, Seeds};
use crate::error::PortResult;
use crate::pcount::{self, CounterSet};
use crate::sanity;
use crate::score::Score;
use crate::timing::{self, ElapsedTicks, Seconds, TimingSource};

/// Whether the platform layer is initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PortableState {
    /// Torn down (id 0)
    Inactive = 0,
    /// Initialized (id 1)
    Active   = 1,
}

impl PortableState {
    /// Numeric platform id
    pub const fn portable_id(self) -> u8 {
        self as u8
    }
}

/// A single benchmark session
#[derive(Debug)]
pub struct Session<P, C> {
    platform: P,
    console: C,
    config: PortConfig,
    timing: TimingSource,
    tick_rate: NonZeroU32,
    state: PortableState,
}

impl<P, C> Session<P, C>
where
    P: PerfCounters + InstructionCache,
    C: ConsoleWriter,
{
    /// Create an inactive session
    pub fn new(platform: P, console: C, config: PortConfig) -> PortResult<Self> {
        let tick_rate = config.tick_rate()?;
        Ok(Self {
            platform,
            console,
            timing: TimingSource::new(config.timer_res_divider),
            tick_rate,
            config,
            state: PortableState::Inactive,
        })
    }

    /// Target specific initialization
    ///
    /// Width mismatches of the platform integer types are reported on the
    /// console and do not stop the run.
    pub fn portable_init(&mut self) {
        self.console.write_str("Ibex CoreMark platform init...\n");
        log::info!(
            "port: init, {} iterations, {} ticks/s",
            self.config.iterations,
            self.tick_rate
        );

        self.check_platform_types::<PtrInt, U32>();

        self.state = PortableState::Active;
        self.platform.set_icache(true);
    }

    fn check_platform_types<Ptr, Word>(&mut self) {
        for advisory in sanity::check_widths::<Ptr, Word>() {
            log::warn!("port: {:?} width check failed", advisory);
            console::print(&mut self.console, format_args!("{}\n", advisory.message()));
        }
    }

    /// Open the measurement window
    pub fn start_time(&mut self) {
        self.timing.start(&mut self.platform);
        log::debug!("port: start at {}", self.timing.start_stamp().0);
    }

    /// Close the measurement window
    pub fn stop_time(&mut self) {
        self.timing.stop(&mut self.platform);
        log::debug!("port: stop at {}", self.timing.stop_stamp().0);
    }

    /// Ticks elapsed in the last window
    pub fn get_time(&self) -> ElapsedTicks {
        self.timing.elapsed()
    }

    /// Convert ticks to seconds at the configured rate
    pub fn time_in_secs(&self, ticks: ElapsedTicks) -> Seconds {
        timing::time_in_secs(ticks, self.tick_rate)
    }

    /// Read the reported counters
    pub fn counters(&self) -> CounterSet {
        pcount::read_counters(&self.platform)
    }

    /// Target specific final code
    ///
    /// Prints the counter report (unless suppressed) and the score line,
    /// then tears the platform state down. An empty window prints
    /// `undefined` for the score and returns
    /// [`crate::PortError::MeasurementWindowTooShort`].
    pub fn portable_fini(&mut self) -> PortResult<Score> {
        if self.config.dump_counters {
            let counters = self.counters();
            pcount::report(&mut self.console, &counters);
        }

        let elapsed = self.get_time();
        let score = Score::compute(self.config.iterations, elapsed);
        match &score {
            Ok(score) => {
                console::print(&mut self.console, format_args!("CoreMark / MHz: {}\n", score));
                log::info!("port: {} iterations in {} ticks", score.iterations(), elapsed);
            },
            Err(err) => {
                self.console.write_str("CoreMark / MHz: undefined\n");
                log::warn!("port: {}", err);
            },
        }
        self.console.flush();

        self.state = PortableState::Inactive;
        score
    }

    /// Platform state
    pub fn state(&self) -> PortableState {
        self.state
    }

    /// Session configuration
    pub fn config(&self) -> &PortConfig {
        &self.config
    }

    /// Workload seeds for this session
    pub fn seeds(&self) -> Seeds {
        self.config.seeds()
    }

    /// Counter bank
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Counter bank, mutably
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Console
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Tear the session apart
    pub fn into_parts(self) -> (P, C) {
        (self.platform, self.console)
    }
}
