//! # Performance Counter Aggregator
//!
//! Controls the counter bank around the timed region and turns the eleven
//! event counters into a labelled report:
//!
//! ```text
//! Performance Counters
//! --------------------
//! Instructions Retired: 12345
//! LSU Busy: 678
//! ...
//! Divide Wait: 0
//!
//! ```

use core::fmt;

use ibex_hal::console::{self, ConsoleWriter};
use ibex_hal::types::CounterValue;
use ibex_hal::{HpmCounter, PerfCounters};

// =============================================================================
// Counter Categories
// =============================================================================

/// Event category reported by the port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    /// Instructions retired
    InstructionsRetired,
    /// Cycles the load/store unit was busy
    LsuBusy,
    /// Cycles waiting on instruction fetch
    IfetchWait,
    /// Loads
    Loads,
    /// Stores
    Stores,
    /// Unconditional jumps
    Jumps,
    /// Conditional branches
    Branches,
    /// Taken conditional branches
    TakenBranches,
    /// Compressed instructions retired
    CompressedInstructions,
    /// Cycles waiting on the multiplier
    MultiplyWait,
    /// Cycles waiting on the divider
    DivideWait,
}

impl CounterKind {
    /// Report label
    pub const fn name(self) -> &'static str {
        match self {
            CounterKind::InstructionsRetired => "Instructions Retired",
            CounterKind::LsuBusy => "LSU Busy",
            CounterKind::IfetchWait => "IFetch wait",
            CounterKind::Loads => "Loads",
            CounterKind::Stores => "Stores",
            CounterKind::Jumps => "Jumps",
            CounterKind::Branches => "Branches",
            CounterKind::TakenBranches => "Taken Branches",
            CounterKind::CompressedInstructions => "Compressed Instructions",
            CounterKind::MultiplyWait => "Multiply Wait",
            CounterKind::DivideWait => "Divide Wait",
        }
    }

    /// Register backing this category
    pub const fn register(self) -> HpmCounter {
        let mut i = 0;
        while i < COUNTER_COUNT {
            if COUNTER_MAP[i].0 as u8 == self as u8 {
                return COUNTER_MAP[i].1;
            }
            i += 1;
        }
        unreachable!()
    }
}

/// Number of reported counters
pub const COUNTER_COUNT: usize = 11;

/// Report order and backing register of every category
pub const COUNTER_MAP: [(CounterKind, HpmCounter); COUNTER_COUNT] = [
    (CounterKind::InstructionsRetired, HpmCounter::Minstret),
    (CounterKind::LsuBusy, HpmCounter::Mhpmcounter3),
    (CounterKind::IfetchWait, HpmCounter::Mhpmcounter4),
    (CounterKind::Loads, HpmCounter::Mhpmcounter5),
    (CounterKind::Stores, HpmCounter::Mhpmcounter6),
    (CounterKind::Jumps, HpmCounter::Mhpmcounter7),
    (CounterKind::Branches, HpmCounter::Mhpmcounter8),
    (CounterKind::TakenBranches, HpmCounter::Mhpmcounter9),
    (CounterKind::CompressedInstructions, HpmCounter::Mhpmcounter10),
    (CounterKind::MultiplyWait, HpmCounter::Mhpmcounter11),
    (CounterKind::DivideWait, HpmCounter::Mhpmcounter12),
];

// Every event counter except mcycle is reported.
static_assertions::const_assert_eq!(COUNTER_COUNT, HpmCounter::COUNT - 1);

// =============================================================================
// Counter Set
// =============================================================================

/// One reported counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterEntry {
    /// Category
    pub kind: CounterKind,
    /// Value read at the end of the window
    pub value: CounterValue,
}

impl CounterEntry {
    /// Report label
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl fmt::Display for CounterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.value)
    }
}

/// All reported counters, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSet {
    entries: [CounterEntry; COUNTER_COUNT],
}

impl CounterSet {
    /// Set with every counter at zero
    pub const fn zeroed() -> Self {
        let mut entries = [CounterEntry {
            kind: CounterKind::InstructionsRetired,
            value: 0,
        }; COUNTER_COUNT];
        let mut i = 0;
        while i < COUNTER_COUNT {
            entries[i].kind = COUNTER_MAP[i].0;
            i += 1;
        }
        Self { entries }
    }

    /// Build from values listed in report order
    pub const fn from_values(values: [CounterValue; COUNTER_COUNT]) -> Self {
        let mut set = Self::zeroed();
        let mut i = 0;
        while i < COUNTER_COUNT {
            set.entries[i].value = values[i];
            i += 1;
        }
        set
    }

    /// Number of entries
    pub const fn len(&self) -> usize {
        COUNTER_COUNT
    }

    /// Always false; the set has a fixed length
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Entries in report order
    pub fn iter(&self) -> impl Iterator<Item = &CounterEntry> {
        self.entries.iter()
    }

    /// Value of one category
    pub fn get(&self, kind: CounterKind) -> CounterValue {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind)
            .map_or(0, |entry| entry.value)
    }

    /// Entries as a slice
    pub fn as_slice(&self) -> &[CounterEntry] {
        &self.entries
    }
}

impl Default for CounterSet {
    fn default() -> Self {
        Self::zeroed()
    }
}

// =============================================================================
// Counter Control
// =============================================================================

/// Let the counter bank accumulate, or freeze it
pub fn enable_counters<B: PerfCounters + ?Sized>(bank: &mut B, on: bool) {
    bank.set_enabled(on);
}

/// Zero every counter
///
/// The bank must be disabled; a reset racing live increments is logged.
pub fn reset_counters<B: PerfCounters + ?Sized>(bank: &mut B) {
    if bank.is_enabled() {
        log::warn!("pcount: reset while counters are enabled");
    }
    bank.reset();
}

/// Read every reported counter back-to-back
pub fn read_counters<B: PerfCounters + ?Sized>(bank: &B) -> CounterSet {
    let mut values = [0; COUNTER_COUNT];
    for (value, (_, register)) in values.iter_mut().zip(COUNTER_MAP.iter()) {
        *value = bank.read(*register);
    }
    CounterSet::from_values(values)
}

/// Render the counter report
pub fn report(out: &mut dyn ConsoleWriter, counters: &CounterSet) {
    out.write_str("Performance Counters\n--------------------\n");
    for entry in counters.iter() {
        console::print(out, format_args!("{}\n", entry));
    }
    out.write_str("\n");
}
