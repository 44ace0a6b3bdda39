//! Host-side simulation peripherals.
//!
//! Cheap `embedded-hal` implementations backed by shared atomics.  Every
//! type is `Clone`; clones observe and drive the same line, so a test can
//! keep one handle while a task owns another.

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

// ── Digital input ─────────────────────────────────────────────

/// Simulated digital input.  Counts how often it is sampled.
#[derive(Debug, Clone)]
pub struct SimInput {
    high: Arc<AtomicBool>,
    samples: Arc<AtomicUsize>,
}

impl SimInput {
    pub fn new(high: bool) -> Self {
        Self {
            high: Arc::new(AtomicBool::new(high)),
            samples: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Pulled-up switch input at rest (released reads high).
    pub fn pulled_up() -> Self {
        Self::new(true)
    }

    /// Drive the line to `high`.
    pub fn set_level(&self, high: bool) {
        self.high.store(high, Ordering::Release);
    }

    /// Close an active-low switch.
    pub fn press(&self) {
        self.set_level(false);
    }

    /// Open an active-low switch.
    pub fn release(&self) {
        self.set_level(true);
    }

    /// Number of reads so far.
    pub fn samples(&self) -> usize {
        self.samples.load(Ordering::Acquire)
    }
}

impl ErrorType for SimInput {
    type Error = Infallible;
}

impl InputPin for SimInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.samples.fetch_add(1, Ordering::AcqRel);
        Ok(self.high.load(Ordering::Acquire))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

// ── Digital output ────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SimOutput {
    high: Arc<AtomicBool>,
}

impl SimOutput {
    pub fn new(high: bool) -> Self {
        Self {
            high: Arc::new(AtomicBool::new(high)),
        }
    }

    pub fn is_set_high(&self) -> bool {
        self.high.load(Ordering::Acquire)
    }
}

impl ErrorType for SimOutput {
    type Error = Infallible;
}

impl OutputPin for SimOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.store(false, Ordering::Release);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high.store(true, Ordering::Release);
        Ok(())
    }
}

// ── PWM channel ───────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SimPwm {
    max: u16,
    duty: Arc<AtomicU16>,
}

impl SimPwm {
    /// Channel with `max` duty resolution (255 for an 8-bit LEDC timer).
    pub fn new(max: u16) -> Self {
        Self {
            max,
            duty: Arc::new(AtomicU16::new(0)),
        }
    }

    pub fn duty(&self) -> u16 {
        self.duty.load(Ordering::Acquire)
    }
}

impl embedded_hal::pwm::ErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty.store(duty.min(self.max), Ordering::Release);
        Ok(())
    }
}
