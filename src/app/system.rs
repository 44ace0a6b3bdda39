//! Wiring of the four periodic tasks around one shared phase cell.
//!
//! ```text
//!   TemperatureSource ──▶ ThermalWatchTask ──┐
//!   outward InputPin  ──▶ LimitSwitchTask  ──┤
//!   return InputPin   ──▶ LimitSwitchTask  ──┼──▶ PhaseCell
//!   MotorPort         ◀── ExtinguishSequencer┘
//! ```
//!
//! [`ExtinguishSystem`] only builds and hands out the tasks; it never
//! runs them itself.  On the device each task becomes a FreeRTOS task
//! ([`ExtinguishSystem::spawn`]); on the host the same tasks are
//! registered with a [`SimScheduler`] ([`ExtinguishSystem::register`]).

use std::thread::JoinHandle;

use embedded_hal::digital::InputPin;
use log::info;

use super::ports::{MotorPort, TemperatureSource};
use super::tasks::{ExtinguishSequencer, LimitSwitchTask, ThermalWatchTask};
use crate::clock::TickClock;
use crate::config::SystemConfig;
use crate::drivers::task_pin::{Core, TaskSpec, spawn_periodic};
use crate::error::Result;
use crate::fsm::PhaseCell;
use crate::scheduler::SimScheduler;

// ───────────────────────────────────────────────────────────────
// Task table
// ───────────────────────────────────────────────────────────────

/// The limit switches outrank the sequencer so a reached end of travel
/// is published before the sequencer's next look at the phase; thermal
/// sensing is the least urgent.
pub const THERMAL_TASK: TaskSpec = TaskSpec {
    thread_name: "thermal\0",
    priority: 4,
    stack_kb: 4,
    core: Core::App,
};

pub const OUTWARD_SWITCH_TASK: TaskSpec = TaskSpec {
    thread_name: "outward-sw\0",
    priority: 6,
    stack_kb: 4,
    core: Core::App,
};

pub const RETURN_SWITCH_TASK: TaskSpec = TaskSpec {
    thread_name: "return-sw\0",
    priority: 6,
    stack_kb: 4,
    core: Core::App,
};

pub const SEQUENCER_TASK: TaskSpec = TaskSpec {
    thread_name: "sequencer\0",
    priority: 5,
    stack_kb: 4,
    core: Core::App,
};

// ───────────────────────────────────────────────────────────────
// ExtinguishSystem
// ───────────────────────────────────────────────────────────────

pub struct ExtinguishSystem<'a, S, A, B, M> {
    pub thermal: ThermalWatchTask<'a, S>,
    pub outward: LimitSwitchTask<'a, A>,
    pub ret: LimitSwitchTask<'a, B>,
    pub sequencer: ExtinguishSequencer<'a, M>,
}

impl<'a, S, A, B, M> ExtinguishSystem<'a, S, A, B, M>
where
    S: TemperatureSource,
    A: InputPin,
    B: InputPin,
    M: MotorPort,
{
    /// Build every task from `config`, all sharing `phase`.
    pub fn new(
        config: &SystemConfig,
        phase: &'a PhaseCell,
        sensor: S,
        outward_pin: A,
        return_pin: B,
        motor: M,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            thermal: ThermalWatchTask::new(
                sensor,
                phase,
                config.fire_threshold_c,
                config.thermal_period_ticks,
            ),
            outward: LimitSwitchTask::outward_travel(
                outward_pin,
                phase,
                config.outward_switch_period_ticks,
            ),
            ret: LimitSwitchTask::return_travel(
                return_pin,
                phase,
                config.return_switch_period_ticks,
            ),
            sequencer: ExtinguishSequencer::new(
                motor,
                phase,
                config.motor_duty_percent,
                config.sequencer_period_ticks,
            ),
        })
    }

    /// Register all four tasks with a simulated scheduler, using the
    /// priorities from the task table.
    pub fn register<'s>(&'s mut self, sched: &mut SimScheduler<'s>) -> Result<()>
    where
        'a: 's,
    {
        sched.add(&mut self.thermal, THERMAL_TASK.priority)?;
        sched.add(&mut self.outward, OUTWARD_SWITCH_TASK.priority)?;
        sched.add(&mut self.ret, RETURN_SWITCH_TASK.priority)?;
        sched.add(&mut self.sequencer, SEQUENCER_TASK.priority)?;
        Ok(())
    }
}

impl<S, A, B, M> ExtinguishSystem<'static, S, A, B, M>
where
    S: TemperatureSource + Send + 'static,
    A: InputPin + Send + 'static,
    B: InputPin + Send + 'static,
    M: MotorPort + Send + 'static,
{
    /// Start every task on its own thread.  The tasks run until power
    /// down; the handles are only useful for host-side tests.
    pub fn spawn<C>(self, clock: C) -> Result<[JoinHandle<()>; 4]>
    where
        C: TickClock + Clone + Send + 'static,
    {
        info!("Starting extinguish tasks");
        Ok([
            spawn_periodic(&RETURN_SWITCH_TASK, self.ret, clock.clone())?,
            spawn_periodic(&OUTWARD_SWITCH_TASK, self.outward, clock.clone())?,
            spawn_periodic(&SEQUENCER_TASK, self.sequencer, clock.clone())?,
            spawn_periodic(&THERMAL_TASK, self.thermal, clock)?,
        ])
    }
}
