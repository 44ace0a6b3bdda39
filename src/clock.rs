//! Scheduler tick boundary and drift-free periodic timing.
//!
//! Every task in the firmware runs its body once per period and then
//! sleeps until an **absolute** deadline computed from its previous
//! deadline, not from "now".  The time a body takes to execute therefore
//! never accumulates into the schedule:
//!
//! ```text
//!   tick:  0        P        2P       3P
//!          |████    |██████  |█       |███
//!          ^body    ^body    ^body    ^body
//!          └─ wake = last_wake + P, independent of body length
//! ```
//!
//! Tick counts are `u32` (FreeRTOS `TickType_t`) and wrap; all ordering
//! checks go through [`reached`].

/// Scheduler tick count.
pub type Ticks = u32;

/// Monotonic tick source plus an absolute-deadline sleep.
pub trait TickClock {
    /// Current tick count.
    fn now(&self) -> Ticks;

    /// Block the calling task until the tick count reaches `deadline`.
    /// Returns immediately if the deadline has already passed.
    fn sleep_until(&self, deadline: Ticks);
}

impl<C: TickClock + ?Sized> TickClock for &C {
    fn now(&self) -> Ticks {
        (**self).now()
    }

    fn sleep_until(&self, deadline: Ticks) {
        (**self).sleep_until(deadline);
    }
}

/// `true` once `now` is at or past `deadline`, tolerating one wrap of the
/// tick counter between the two.
pub fn reached(now: Ticks, deadline: Ticks) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

/// Absolute-deadline period keeper (the `vTaskDelayUntil` pattern).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTimer {
    period: Ticks,
    last_wake: Ticks,
}

impl PeriodicTimer {
    /// Start the grid at `start` (normally `clock.now()` at task entry).
    /// A zero period is raised to one tick so every wait still sleeps.
    pub fn new(start: Ticks, period: Ticks) -> Self {
        Self {
            period: period.max(1),
            last_wake: start,
        }
    }

    /// Start the grid at the clock's current tick.
    pub fn starting_now(clock: &impl TickClock, period: Ticks) -> Self {
        Self::new(clock.now(), period)
    }

    pub fn period(&self) -> Ticks {
        self.period
    }

    /// Deadline of the most recent activation.
    pub fn last_wake(&self) -> Ticks {
        self.last_wake
    }

    /// Deadline of the next activation.
    pub fn next_wake(&self) -> Ticks {
        self.last_wake.wrapping_add(self.period)
    }

    /// Sleep until the next deadline and advance the grid by one period.
    /// Returns the deadline that was waited for.
    ///
    /// If the body overran its period the sleep returns at once, but the
    /// grid still advances by exactly one period.
    pub fn wait(&mut self, clock: &impl TickClock) -> Ticks {
        let deadline = self.next_wake();
        clock.sleep_until(deadline);
        self.last_wake = deadline;
        deadline
    }
}
