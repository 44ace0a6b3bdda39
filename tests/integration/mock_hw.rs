//! Mock hardware for integration tests.
//!
//! Every mock is `Clone` with shared state, so a test keeps one handle
//! while the task under test owns another, and can inspect the full
//! command history without touching real GPIO/PWM registers.

use std::sync::{Arc, Mutex};

use firewatch::app::ports::{MotorDrive, MotorPort, TemperatureSource};
use firewatch::error::MotorError;

// ── Motor ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RecordingMotor {
    inner: Arc<Mutex<MotorLog>>,
}

#[derive(Debug, Default)]
struct MotorLog {
    calls: Vec<MotorDrive>,
    failures_left: usize,
}

#[allow(dead_code)]
impl RecordingMotor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command accepted so far, in order.
    pub fn calls(&self) -> Vec<MotorDrive> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn last(&self) -> Option<MotorDrive> {
        self.inner.lock().unwrap().calls.last().copied()
    }

    /// Reject the next `n` commands with a PWM error.
    pub fn fail_next(&self, n: usize) {
        self.inner.lock().unwrap().failures_left = n;
    }
}

impl MotorPort for RecordingMotor {
    fn drive(&mut self, drive: MotorDrive) -> Result<(), MotorError> {
        let mut log = self.inner.lock().unwrap();
        if log.failures_left > 0 {
            log.failures_left -= 1;
            return Err(MotorError::PwmWriteFailed);
        }
        log.calls.push(drive);
        Ok(())
    }
}

// ── Fire sensor ───────────────────────────────────────────────

/// Temperature the test sets by hand.  `None` simulates a failed read.
#[derive(Debug, Clone)]
pub struct HeatSource {
    celsius: Arc<Mutex<Option<f32>>>,
}

#[allow(dead_code)]
impl HeatSource {
    pub fn new(celsius: f32) -> Self {
        Self {
            celsius: Arc::new(Mutex::new(Some(celsius))),
        }
    }

    pub fn set(&self, celsius: f32) {
        *self.celsius.lock().unwrap() = Some(celsius);
    }

    pub fn fail(&self) {
        *self.celsius.lock().unwrap() = None;
    }
}

impl TemperatureSource for HeatSource {
    fn read_celsius(&mut self) -> Option<f32> {
        *self.celsius.lock().unwrap()
    }
}
