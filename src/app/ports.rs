//! Port traits: the boundary between the periodic tasks and the hardware.
//!
//! ```text
//!   Driver ──▶ Port trait ──▶ Task (domain)
//! ```
//!
//! Limit switches use `embedded_hal::digital::InputPin` directly; the
//! thermal sensor and the extinguisher motor sit behind the traits below
//! so tasks can be exercised with mocks on the host.

use crate::error::MotorError;

// ───────────────────────────────────────────────────────────────
// Temperature port (driven adapter: sensor → thermal watch)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the fire sensor.
pub trait TemperatureSource {
    /// Hottest temperature currently observed, in Celsius.
    /// `None` if the sensor could not be read this period.
    fn read_celsius(&mut self) -> Option<f32>;
}

// ───────────────────────────────────────────────────────────────
// Motor port (driven adapter: sequencer → motor driver)
// ───────────────────────────────────────────────────────────────

/// Requested motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorDrive {
    /// Motor stopped.
    Stopped,
    /// Driving toward the extinguisher lever.
    Outward { duty: u8 },
    /// Driving back toward the rest position.
    Return { duty: u8 },
}

impl MotorDrive {
    pub fn is_moving(self) -> bool {
        !matches!(self, Self::Stopped)
    }
}

/// Write-side port: the sequencer commands the actuation motor through it.
pub trait MotorPort {
    /// Apply `drive`.  Duty is 0–100 %.
    fn drive(&mut self, drive: MotorDrive) -> Result<(), MotorError>;
}

impl<M: MotorPort + ?Sized> MotorPort for &mut M {
    fn drive(&mut self, drive: MotorDrive) -> Result<(), MotorError> {
        (**self).drive(drive)
    }
}
