//! Periodic task bodies.
//!
//! Each task does one short, non-blocking pass per activation
//! ([`PeriodicTask::run_once`]) and then sleeps until its next absolute
//! deadline.  All coordination goes through the shared
//! [`PhaseCell`](crate::fsm::PhaseCell); tasks never call each other.

pub mod limit_switch;
pub mod sequencer;
pub mod thermal;

use log::info;

use crate::clock::{PeriodicTimer, TickClock, Ticks};

pub use limit_switch::LimitSwitchTask;
pub use sequencer::ExtinguishSequencer;
pub use thermal::ThermalWatchTask;

/// A body executed once per fixed period.
pub trait PeriodicTask {
    /// Task name (logging, thread name).
    fn name(&self) -> &'static str;

    /// Period in scheduler ticks.
    fn period(&self) -> Ticks;

    /// One activation.  Must not block.
    fn run_once(&mut self);
}

impl<T: PeriodicTask + ?Sized> PeriodicTask for &mut T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn period(&self) -> Ticks {
        (**self).period()
    }

    fn run_once(&mut self) {
        (**self).run_once();
    }
}

/// Run `task` forever on its period.  The only suspension point is the
/// absolute-deadline sleep at the end of each activation.
pub fn run_periodic<T: PeriodicTask, C: TickClock>(mut task: T, clock: C) -> ! {
    let mut timer = PeriodicTimer::starting_now(&clock, task.period());
    info!(
        "Task '{}' running every {} ticks from tick {}",
        task.name(),
        timer.period(),
        timer.last_wake()
    );
    loop {
        task.run_once();
        timer.wait(&clock);
    }
}

/// Run `activations` periods of `task` and return the timer, so callers
/// can inspect where the grid ended up.
pub fn run_for<T: PeriodicTask, C: TickClock>(
    task: &mut T,
    clock: &C,
    activations: usize,
) -> PeriodicTimer {
    let mut timer = PeriodicTimer::starting_now(clock, task.period());
    for _ in 0..activations {
        task.run_once();
        timer.wait(clock);
    }
    timer
}
