//! Tick clock adapters.
//!
//! - **`FreeRtosClock`** (`target_os = "espidf"`) wraps
//!   `xTaskGetTickCount()` / `xTaskDelayUntil()`; the kernel computes the
//!   wake time inside its own critical section, so preemption between the
//!   tick read and the delay cannot shift the deadline.
//! - **`StdClock`**: `std::time::Instant` with a configurable tick length,
//!   for host-side simulation with real threads.
//! - **`ManualClock`**: tick count advanced explicitly; `sleep_until`
//!   jumps straight to the deadline.  Used by tests and the simulated
//!   scheduler.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::clock::{reached, TickClock, Ticks};

// ───────────────────────────────────────────────────────────────
// FreeRTOS
// ───────────────────────────────────────────────────────────────

/// FreeRTOS kernel tick source.
#[cfg(target_os = "espidf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeRtosClock;

#[cfg(target_os = "espidf")]
impl TickClock for FreeRtosClock {
    fn now(&self) -> Ticks {
        unsafe { esp_idf_svc::sys::xTaskGetTickCount() }
    }

    fn sleep_until(&self, deadline: Ticks) {
        let mut previous = self.now();
        if reached(previous, deadline) {
            return;
        }
        let increment = deadline.wrapping_sub(previous);
        // SAFETY: `previous` outlives the call; the kernel only writes the
        // computed wake time back into it.
        unsafe {
            esp_idf_svc::sys::xTaskDelayUntil(&mut previous, increment);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Host wall clock
// ───────────────────────────────────────────────────────────────

/// Host tick source backed by `std::time::Instant`.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    start: std::time::Instant,
    tick: std::time::Duration,
}

#[cfg(not(target_os = "espidf"))]
impl StdClock {
    /// Clock ticking at `tick_hz` (1000 gives one tick per millisecond).
    /// Rates above 1 GHz are treated as one tick per nanosecond.
    pub fn new(tick_hz: u32) -> Self {
        let nanos = (1_000_000_000 / tick_hz.max(1) as u64).max(1);
        Self {
            start: std::time::Instant::now(),
            tick: std::time::Duration::from_nanos(nanos),
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl TickClock for StdClock {
    fn now(&self) -> Ticks {
        (self.start.elapsed().as_nanos() / self.tick.as_nanos()) as Ticks
    }

    fn sleep_until(&self, deadline: Ticks) {
        let now = self.now();
        if reached(now, deadline) {
            return;
        }
        let remaining = deadline.wrapping_sub(now);
        std::thread::sleep(self.tick * remaining);
    }
}

// ───────────────────────────────────────────────────────────────
// Manual clock
// ───────────────────────────────────────────────────────────────

/// Explicitly driven tick source.
///
/// Shared by reference between a test and the code under test; interior
/// atomics let the test advance time while tasks hold `&ManualClock`.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU32,
}

impl ManualClock {
    pub const fn new(start: Ticks) -> Self {
        Self {
            now: AtomicU32::new(start),
        }
    }

    /// Move time forward by `ticks` (simulates body execution time).
    pub fn advance(&self, ticks: Ticks) {
        self.now.fetch_add(ticks, Ordering::AcqRel);
    }

    /// Jump to an absolute tick count.
    pub fn set(&self, now: Ticks) {
        self.now.store(now, Ordering::Release);
    }
}

impl TickClock for ManualClock {
    fn now(&self) -> Ticks {
        self.now.load(Ordering::Acquire)
    }

    fn sleep_until(&self, deadline: Ticks) {
        if !reached(self.now(), deadline) {
            self.set(deadline);
        }
    }
}
