//! Deterministic fixed-priority periodic scheduler for host simulation.
//!
//! On the device every task is its own FreeRTOS task sleeping in
//! `xTaskDelayUntil`.  On the host, [`SimScheduler`] reproduces the same
//! release pattern against a [`ManualClock`] so whole extinguish cycles
//! can be replayed tick-exactly:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  slot  task             prio  period  next_release           │
//! │  ────  ───────────────  ────  ──────  ────────────           │
//! │   0    thermal-watch      4     250        250               │
//! │   1    outward-switch     6     100        100               │
//! │   2    return-switch      6     100        100  ◀─ next      │
//! │   3    sequencer          5      50        100               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step releases the task with the earliest absolute deadline;
//! simultaneous releases run highest priority first, then in
//! registration order.  The next release is always `previous release +
//! period`, so body execution time never shifts the schedule.  Bodies
//! are not preempted mid-activation; ordering between tasks is only
//! modelled at release granularity.

use heapless::Vec;
use log::info;

use crate::adapters::time::ManualClock;
use crate::app::tasks::PeriodicTask;
use crate::clock::{TickClock, Ticks, reached};
use crate::error::{Error, Result};

/// Maximum number of registered tasks (stack-allocated).
pub const MAX_TASKS: usize = 8;

struct Slot<'a> {
    task: &'a mut (dyn PeriodicTask + 'a),
    priority: u8,
    next_release: Ticks,
    activations: u64,
}

/// Fixed-priority periodic scheduler driven by a [`ManualClock`].
pub struct SimScheduler<'a> {
    clock: &'a ManualClock,
    slots: Vec<Slot<'a>, MAX_TASKS>,
}

impl<'a> SimScheduler<'a> {
    pub fn new(clock: &'a ManualClock) -> Self {
        Self {
            clock,
            slots: Vec::new(),
        }
    }

    /// Register a task.  Its first activation is at the current tick.
    /// Returns the slot index.
    pub fn add(&mut self, task: &'a mut (dyn PeriodicTask + 'a), priority: u8) -> Result<usize> {
        if task.period() == 0 {
            return Err(Error::Init("task period must be non-zero"));
        }
        let slot = self.slots.len();
        let now = self.clock.now();
        info!(
            "Scheduler: added '{}' at slot {} (prio={}, period={})",
            task.name(),
            slot,
            priority,
            task.period()
        );
        self.slots
            .push(Slot {
                task,
                priority,
                next_release: now,
                activations: 0,
            })
            .map_err(|_| Error::Init("scheduler task table full"))?;
        Ok(slot)
    }

    /// Current simulated tick.
    pub fn now(&self) -> Ticks {
        self.clock.now()
    }

    /// Run every activation due at or before `end`, then leave the clock
    /// at `end` (or later, if a body advanced it further).
    pub fn run_until(&mut self, end: Ticks) {
        while let Some(idx) = self.next_due(end) {
            let slot = &mut self.slots[idx];
            self.clock.sleep_until(slot.next_release);
            slot.task.run_once();
            slot.activations += 1;
            slot.next_release = slot.next_release.wrapping_add(slot.task.period());
        }
        self.clock.sleep_until(end);
    }

    /// Run for `ticks` from the current tick.
    pub fn run_for(&mut self, ticks: Ticks) {
        let end = self.clock.now().wrapping_add(ticks);
        self.run_until(end);
    }

    /// Number of times the task in `slot` has run.
    pub fn activations(&self, slot: usize) -> u64 {
        self.slots.get(slot).map_or(0, |s| s.activations)
    }

    /// Absolute tick of the next activation of the task in `slot`.
    pub fn next_release(&self, slot: usize) -> Option<Ticks> {
        self.slots.get(slot).map(|s| s.next_release)
    }

    pub fn task_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot with the earliest release not after `end`; ties go to the
    /// higher priority, then the lower slot index.
    fn next_due(&self, end: Ticks) -> Option<usize> {
        let now = self.clock.now();
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| reached(end, s.next_release))
            .min_by_key(|(i, s)| {
                let offset = s.next_release.wrapping_sub(now) as i32;
                (offset, core::cmp::Reverse(s.priority), *i)
            })
            .map(|(i, _)| i)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
