//! # Ibex CoreMark Port
//!
//! The platform layer CoreMark needs on an Ibex core: a timing source over
//! `mcycle`, an aggregator for the eleven event counters, and the
//! `portable_init` / `portable_fini` pair producing the report and the
//! CoreMark / MHz score.
//!
//! ## Components
//!
//! - **Timing Source** ([`timing`]): start/stop samples, elapsed ticks,
//!   rational seconds
//! - **Counter Aggregator** ([`pcount`]): enable/reset/read of the counter
//!   bank and the labelled report
//! - **Session** ([`session`]): the port protocol over one counter bank and
//!   one console
//! - **Logger** ([`logger`], targets with compare-and-swap only): `log`
//!   records on a console
//!
//! ## Example
//!
//! ```
//! use coremark_port::{PortConfig, Session};
//! use ibex_hal::{BufferConsole, SimCore};
//!
//! let config = PortConfig::new().with_iterations(10);
//! let mut session = Session::new(SimCore::new(), BufferConsole::<1024>::new(), config)?;
//! session.portable_init();
//! session.start_time();
//! session.platform_mut().step(500_000);
//! session.stop_time();
//! let score = session.portable_fini()?;
//! assert_eq!(score.per_mhz(), 20.0);
//! # Ok::<(), coremark_port::PortError>(())
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
#[cfg(target_has_atomic = "ptr")]
pub mod logger;
pub mod pcount;
pub mod sanity;
pub mod score;
pub mod session;
pub mod timing;

pub use config::{PortConfig, RunProfile, Seeds};
pub use error::{PortError, PortResult};
pub use pcount::{CounterKind, CounterSet};
pub use score::Score;
pub use session::{PortableState, Session};
pub use timing::{ElapsedTicks, Seconds, Timestamp};
