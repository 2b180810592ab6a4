//! End-to-end runs of the port protocol over the simulated counter bank.

use coremark_port::pcount::COUNTER_MAP;
use coremark_port::{CounterKind, ElapsedTicks, PortConfig, PortError, PortableState, Session};
use ibex_hal::{BufferConsole, HpmCounter, PerfCounters, SimCore};

type SimSession = Session<SimCore, BufferConsole<4096>>;

fn new_session(config: PortConfig) -> SimSession {
    Session::new(SimCore::new(), BufferConsole::new(), config).unwrap()
}

/// Stand-in for the benchmark workload: retires instructions and bumps the
/// event counters the way one iteration would.
fn run_workload(core: &mut SimCore, iterations: u32) {
    for _ in 0..iterations {
        core.step(250);
        core.record(HpmCounter::Minstret, 180);
        core.record(HpmCounter::Mhpmcounter5, 40);
        core.record(HpmCounter::Mhpmcounter6, 12);
        core.record(HpmCounter::Mhpmcounter8, 20);
        core.record(HpmCounter::Mhpmcounter9, 11);
    }
}

#[test]
fn full_run_reports_counters_and_score() {
    let config = PortConfig::new().with_iterations(2000).with_counter_dump(true);
    let mut session = new_session(config);

    // Activity before the window must not leak into the report.
    run_workload(session.platform_mut(), 3);

    session.portable_init();
    session.start_time();
    run_workload(session.platform_mut(), 2000);
    session.stop_time();

    let elapsed = session.get_time();
    assert_eq!(elapsed, ElapsedTicks(500_000));
    assert_eq!(session.time_in_secs(elapsed).as_f64(), 1.0);

    let counters = session.counters();
    assert_eq!(counters.get(CounterKind::InstructionsRetired), 360_000);
    assert_eq!(counters.get(CounterKind::Loads), 80_000);
    assert_eq!(counters.get(CounterKind::TakenBranches), 22_000);
    assert_eq!(counters.get(CounterKind::DivideWait), 0);

    let score = session.portable_fini().unwrap();
    assert_eq!(score.per_mhz(), 4000.0);
    assert_eq!(session.state(), PortableState::Inactive);

    let (core, console) = session.into_parts();
    assert!(!core.is_enabled());
    assert!(!console.overflowed());

    let lines: Vec<&str> = console.as_str().lines().collect();
    assert_eq!(lines[0], "Ibex CoreMark platform init...");
    assert_eq!(lines[1], "Performance Counters");
    assert_eq!(lines[2], "--------------------");
    for (line, (kind, _)) in lines[3..].iter().zip(COUNTER_MAP.iter()) {
        assert!(line.starts_with(&format!("{}: ", kind.name())), "{line}");
    }
    assert_eq!(lines[3], "Instructions Retired: 360000");
    assert_eq!(lines[14], "");
    assert_eq!(lines[15], "CoreMark / MHz: 4000.000000");
    assert_eq!(lines.len(), 16);
}

#[test]
fn counters_frozen_after_stop() {
    let mut session = new_session(PortConfig::new().with_counter_dump(false));
    session.portable_init();
    session.start_time();
    run_workload(session.platform_mut(), 1);
    session.stop_time();
    let before = session.counters();

    run_workload(session.platform_mut(), 10);
    assert_eq!(session.counters(), before);
    assert_eq!(session.get_time(), ElapsedTicks(250));
}

#[test]
fn second_window_starts_from_zero() {
    let mut session = new_session(PortConfig::new().with_counter_dump(false));
    session.portable_init();

    session.start_time();
    run_workload(session.platform_mut(), 4);
    session.stop_time();
    assert_eq!(session.get_time(), ElapsedTicks(1000));

    session.start_time();
    run_workload(session.platform_mut(), 1);
    session.stop_time();
    assert_eq!(session.get_time(), ElapsedTicks(250));
    assert_eq!(session.counters().get(CounterKind::Stores), 12);
}

#[test]
fn empty_window_prints_undefined() {
    let mut session = new_session(PortConfig::new().with_counter_dump(false));
    session.portable_init();
    session.start_time();
    session.stop_time();

    assert_eq!(
        session.portable_fini(),
        Err(PortError::MeasurementWindowTooShort)
    );
    assert_eq!(
        session.console().as_str(),
        "Ibex CoreMark platform init...\nCoreMark / MHz: undefined\n"
    );
}
