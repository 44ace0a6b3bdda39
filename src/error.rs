//! Unified error types for the Firewatch firmware.
//!
//! The periodic core (shared phase, limit switches, thermal watch,
//! sequencer) never returns errors: a failed read or command is logged and
//! retried on the next period.  These types cover the edges where failure
//! is reportable: driver calls, configuration, and start-up.
//! All variants are `Copy` so drivers can hand them back without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the periodic core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The extinguisher motor could not be commanded.
    Motor(MotorError),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
    /// Peripheral or task initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motor(e) => write!(f, "motor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Motor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// Direction GPIO write failed.
    GpioWriteFailed,
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl std::error::Error for MotorError {}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Self::Motor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
