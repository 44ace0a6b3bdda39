//! Return-travel limit switch on its own, released by the simulated
//! scheduler at its 100-tick period.

use firewatch::adapters::time::ManualClock;
use firewatch::app::tasks::LimitSwitchTask;
use firewatch::clock::Ticks;
use firewatch::drivers::sim::SimInput;
use firewatch::fsm::{Phase, PhaseCell};
use firewatch::scheduler::SimScheduler;

const PERIOD: Ticks = 100;

#[test]
fn press_is_seen_within_one_period() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::RETURNING);
    let pin = SimInput::pulled_up();
    let mut task = LimitSwitchTask::return_travel(pin.clone(), &phase, PERIOD);
    let mut sched = SimScheduler::new(&clock);
    sched.add(&mut task, 6).unwrap();

    let pressed_at = 1234;
    sched.run_until(pressed_at);
    assert_eq!(phase.get(), Phase::RETURNING);
    pin.press();

    while phase.get() != Phase::HOME {
        assert!(sched.now() - pressed_at <= PERIOD, "press not seen in time");
        sched.run_for(1);
    }
    assert_eq!(phase.get(), Phase::HOME);
    assert_eq!(sched.now(), 1300);
}

#[test]
fn home_is_written_once_and_sampling_stops() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::RETURNING);
    let pin = SimInput::pulled_up();
    let mut task = LimitSwitchTask::return_travel(pin.clone(), &phase, PERIOD);
    let mut sched = SimScheduler::new(&clock);
    let slot = sched.add(&mut task, 6).unwrap();

    pin.press();
    sched.run_for(10 * PERIOD);
    assert_eq!(phase.get(), Phase::HOME);
    assert_eq!(sched.activations(slot), 11);
    // Only the first activation read the pin.
    assert_eq!(pin.samples(), 1);
}

#[test]
fn press_released_between_samples_is_missed() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::RETURNING);
    let pin = SimInput::pulled_up();
    let mut task = LimitSwitchTask::return_travel(pin.clone(), &phase, PERIOD);
    let mut sched = SimScheduler::new(&clock);
    sched.add(&mut task, 6).unwrap();

    sched.run_until(1010);
    pin.press();
    sched.run_until(1090);
    pin.release();
    sched.run_until(2000);
    assert_eq!(phase.get(), Phase::RETURNING);
}

#[test]
fn switch_held_before_window_fires_on_entry() {
    let clock = ManualClock::new(0);
    let phase = PhaseCell::new(Phase::IGNITE);
    let pin = SimInput::pulled_up();
    let mut task = LimitSwitchTask::return_travel(pin.clone(), &phase, PERIOD);
    let mut sched = SimScheduler::new(&clock);
    sched.add(&mut task, 6).unwrap();

    pin.press();
    sched.run_until(1000);
    assert_eq!(phase.get(), Phase::IGNITE);
    assert_eq!(pin.samples(), 0);

    phase.put(Phase::RETURNING);
    sched.run_for(PERIOD);
    assert_eq!(phase.get(), Phase::HOME);
}
