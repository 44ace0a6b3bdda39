//! Full extinguish cycle through the simulated scheduler.
//!
//! All four tasks run on their configured periods against a
//! `ManualClock`; the test plays the hardware by heating the sensor and
//! closing switches between scheduler runs.

use firewatch::adapters::time::ManualClock;
use firewatch::app::ports::MotorDrive;
use firewatch::app::system::ExtinguishSystem;
use firewatch::config::SystemConfig;
use firewatch::drivers::sim::SimInput;
use firewatch::fsm::{Phase, PhaseCell};
use firewatch::scheduler::SimScheduler;

use crate::mock_hw::{HeatSource, RecordingMotor};

type TestSystem<'a> = ExtinguishSystem<'a, HeatSource, SimInput, SimInput, RecordingMotor>;

/// Test-side handles to the hardware the tasks own.
struct Rig {
    heat: HeatSource,
    outward: SimInput,
    ret: SimInput,
    motor: RecordingMotor,
}

fn build(phase: &PhaseCell) -> (TestSystem<'_>, Rig) {
    let rig = Rig {
        heat: HeatSource::new(20.0),
        outward: SimInput::pulled_up(),
        ret: SimInput::pulled_up(),
        motor: RecordingMotor::new(),
    };
    let system = ExtinguishSystem::new(
        &SystemConfig::default(),
        phase,
        rig.heat.clone(),
        rig.outward.clone(),
        rig.ret.clone(),
        rig.motor.clone(),
    )
    .unwrap();
    (system, rig)
}

const OUT: MotorDrive = MotorDrive::Outward { duty: 80 };
const BACK: MotorDrive = MotorDrive::Return { duty: 80 };

/// Heat the sensor and push the lever: leaves the cycle in `RETURNING`
/// at tick 700 with the outward switch released again.
fn drive_to_returning(sched: &mut SimScheduler<'_>, rig: &Rig, phase: &PhaseCell) {
    rig.heat.set(75.0);
    sched.run_for(550);
    assert_eq!(phase.get(), Phase::IGNITE);
    assert_eq!(rig.motor.last(), Some(OUT));

    rig.heat.set(20.0);
    rig.outward.press();
    sched.run_for(150);
    assert_eq!(phase.get(), Phase::RETURNING);
    assert_eq!(rig.motor.last(), Some(BACK));
    rig.outward.release();
}

#[test]
fn full_cycle_returns_to_idle() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::IDLE);
    let (mut system, rig) = build(&phase);
    let mut sched = SimScheduler::new(&clock);
    system.register(&mut sched).unwrap();

    sched.run_for(1000);
    assert_eq!(phase.get(), Phase::IDLE);
    assert_eq!(rig.motor.calls(), vec![MotorDrive::Stopped]);

    rig.heat.set(75.0);
    sched.run_for(300);
    assert_eq!(phase.get(), Phase::IGNITE);
    assert_eq!(rig.motor.last(), Some(OUT));

    rig.heat.set(20.0);
    rig.outward.press();
    sched.run_for(100);
    assert_eq!(phase.get(), Phase::RETURNING);
    assert_eq!(rig.motor.last(), Some(BACK));

    rig.outward.release();
    rig.ret.press();
    sched.run_for(100);
    assert_eq!(phase.get(), Phase::IDLE);
    assert_eq!(
        rig.motor.calls(),
        vec![MotorDrive::Stopped, OUT, BACK, MotorDrive::Stopped]
    );

    // Resting on the home switch while idle changes nothing.
    sched.run_for(5000);
    assert_eq!(phase.get(), Phase::IDLE);
    assert_eq!(rig.motor.calls().len(), 4);
}

#[test]
fn persisting_fire_starts_a_new_cycle() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::IDLE);
    let (mut system, rig) = build(&phase);
    let mut sched = SimScheduler::new(&clock);
    system.register(&mut sched).unwrap();

    drive_to_returning(&mut sched, &rig, &phase);
    rig.heat.set(90.0);
    rig.ret.press();
    sched.run_for(100);
    assert_eq!(phase.get(), Phase::IDLE);

    rig.ret.release();
    sched.run_for(250);
    assert_eq!(phase.get(), Phase::IGNITE);
    assert_eq!(rig.motor.last(), Some(OUT));
}

#[test]
fn failed_stop_holds_home_until_retried() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::IDLE);
    let (mut system, rig) = build(&phase);
    let mut sched = SimScheduler::new(&clock);
    system.register(&mut sched).unwrap();

    drive_to_returning(&mut sched, &rig, &phase);
    rig.motor.fail_next(1);
    rig.ret.press();
    sched.run_for(100);
    assert_eq!(phase.get(), Phase::HOME);
    assert_eq!(rig.motor.last(), Some(BACK));

    sched.run_for(50);
    assert_eq!(phase.get(), Phase::IDLE);
    assert_eq!(rig.motor.last(), Some(MotorDrive::Stopped));
}

#[test]
fn stalled_return_stays_returning() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::RETURNING);
    let (mut system, rig) = build(&phase);
    let mut sched = SimScheduler::new(&clock);
    system.register(&mut sched).unwrap();

    // 10 000 return-switch periods without the switch ever closing.
    sched.run_for(100 * 10_000);
    assert_eq!(phase.get(), Phase::RETURNING);
    assert_eq!(rig.motor.calls(), vec![BACK]);
    assert_eq!(rig.ret.samples(), 10_001);
    assert_eq!(rig.outward.samples(), 0);
}

#[test]
fn return_switch_ignored_during_outward_travel() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::IGNITE);
    let (mut system, rig) = build(&phase);
    let mut sched = SimScheduler::new(&clock);
    system.register(&mut sched).unwrap();

    rig.ret.press();
    sched.run_for(10_000);
    assert_eq!(phase.get(), Phase::IGNITE);
    assert_eq!(rig.ret.samples(), 0);
    assert_eq!(rig.motor.calls(), vec![OUT]);
}

#[test]
fn unknown_phase_is_left_alone() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase(7));
    let (mut system, rig) = build(&phase);
    let mut sched = SimScheduler::new(&clock);
    system.register(&mut sched).unwrap();

    rig.heat.set(120.0);
    rig.outward.press();
    rig.ret.press();
    sched.run_for(10_000);
    assert_eq!(phase.get(), Phase(7));
    assert!(rig.motor.calls().is_empty());
    assert_eq!(rig.outward.samples(), 0);
    assert_eq!(rig.ret.samples(), 0);
}

#[test]
fn failed_sensor_read_never_ignites() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::IDLE);
    let (mut system, rig) = build(&phase);
    let mut sched = SimScheduler::new(&clock);
    system.register(&mut sched).unwrap();

    rig.heat.fail();
    sched.run_for(10_000);
    assert_eq!(phase.get(), Phase::IDLE);
    assert_eq!(rig.motor.calls(), vec![MotorDrive::Stopped]);
}
