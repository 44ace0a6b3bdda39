//! The four tasks on real threads against `StdClock`, sharing a static
//! phase cell the way the firmware does.
//!
//! Spawned tasks never return; they keep polling their own mocks until
//! the test process exits.

use std::time::{Duration, Instant};

use firewatch::adapters::time::StdClock;
use firewatch::app::ports::MotorDrive;
use firewatch::app::system::ExtinguishSystem;
use firewatch::config::SystemConfig;
use firewatch::drivers::sim::SimInput;
use firewatch::fsm::{Phase, PhaseCell};

use crate::mock_hw::{HeatSource, RecordingMotor};

static PHASE: PhaseCell = PhaseCell::new(Phase::IDLE);

const OUT: MotorDrive = MotorDrive::Outward { duty: 80 };
const BACK: MotorDrive = MotorDrive::Return { duty: 80 };

fn wait_until(what: &str, mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {what} (phase {})",
            PHASE.get()
        );
        std::thread::sleep(Duration::from_millis(1));
    }
}

fn wait_for(phase: Phase) {
    wait_until(phase.name(), || PHASE.get() == phase);
}

#[test]
fn cycle_completes_on_threads() {
    let heat = HeatSource::new(20.0);
    let outward = SimInput::pulled_up();
    let ret = SimInput::pulled_up();
    let motor = RecordingMotor::new();

    let system = ExtinguishSystem::new(
        &SystemConfig::default(),
        &PHASE,
        heat.clone(),
        outward.clone(),
        ret.clone(),
        motor.clone(),
    )
    .unwrap();
    // 10 kHz ticks: every period is a few milliseconds.
    let _handles = system.spawn(StdClock::new(10_000)).unwrap();

    wait_until("initial stop", || motor.last() == Some(MotorDrive::Stopped));
    heat.set(75.0);
    wait_for(Phase::IGNITE);
    // A switch only closes once the motor has carried the lever to it.
    wait_until("outward drive", || motor.last() == Some(OUT));
    heat.set(20.0);
    outward.press();

    wait_for(Phase::RETURNING);
    wait_until("return drive", || motor.last() == Some(BACK));
    outward.release();
    ret.press();

    wait_for(Phase::IDLE);
    // IDLE is only written after the stop was accepted.
    assert_eq!(
        motor.calls(),
        vec![MotorDrive::Stopped, OUT, BACK, MotorDrive::Stopped]
    );
}
