//! System configuration parameters
//!
//! Task periods, the fire trigger temperature, and motor drive strength.
//! Values can be overridden from a JSON document via
//! [`SystemConfig::from_json`]; fields it omits keep their defaults.

use serde::{Deserialize, Serialize};

use crate::clock::Ticks;
use crate::error::{Error, Result};

/// Highest accepted tick rate (1 µs ticks).
pub const MAX_TICK_HZ: u32 = 1_000_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Thermal ---
    /// Temperature (Celsius) at or above which a fire is declared
    pub fire_threshold_c: f32,

    // --- Motor ---
    /// Extinguisher motor PWM duty cycle while travelling (1-100%)
    pub motor_duty_percent: u8,

    // --- Timing (scheduler ticks) ---
    /// Scheduler tick rate; 1000 Hz means one tick per millisecond
    pub tick_hz: u32,
    /// Thermal watch task period
    pub thermal_period_ticks: Ticks,
    /// Extinguish sequencer task period
    pub sequencer_period_ticks: Ticks,
    /// Outward-travel limit switch task period
    pub outward_switch_period_ticks: Ticks,
    /// Return-travel limit switch task period
    pub return_switch_period_ticks: Ticks,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thermal
            fire_threshold_c: 60.0, // 140 °F

            // Motor
            motor_duty_percent: 80,

            // Timing
            tick_hz: 1000,
            thermal_period_ticks: 250,
            sequencer_period_ticks: 50,
            outward_switch_period_ticks: 100,
            return_switch_period_ticks: 100,
        }
    }
}

impl SystemConfig {
    /// Reject values that would leave a task unschedulable or the motor
    /// unable to move.  Invalid ranges are rejected, not clamped.
    pub fn validate(&self) -> Result<()> {
        if !self.fire_threshold_c.is_finite() {
            return Err(Error::Config("fire_threshold_c must be finite"));
        }
        if self.motor_duty_percent == 0 || self.motor_duty_percent > 100 {
            return Err(Error::Config("motor_duty_percent must be 1..=100"));
        }
        if self.tick_hz == 0 || self.tick_hz > MAX_TICK_HZ {
            return Err(Error::Config("tick_hz must be 1..=1_000_000"));
        }
        let periods = [
            self.thermal_period_ticks,
            self.sequencer_period_ticks,
            self.outward_switch_period_ticks,
            self.return_switch_period_ticks,
        ];
        if periods.contains(&0) {
            return Err(Error::Config("task periods must be non-zero"));
        }
        Ok(())
    }

    /// Parse a JSON document and validate it.  Missing fields take their
    /// default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Periods are counted in kernel ticks, so the configured rate must be
    /// the rate the kernel actually runs at.
    pub fn check_kernel_tick_rate(&self, kernel_hz: u32) -> Result<()> {
        if self.tick_hz != kernel_hz {
            log::error!(
                "tick_hz {} does not match the kernel tick rate {} Hz",
                self.tick_hz,
                kernel_hz
            );
            return Err(Error::Config("tick_hz does not match the kernel tick rate"));
        }
        Ok(())
    }

    /// Convert a period in ticks to milliseconds at the configured tick rate.
    pub fn ticks_to_ms(&self, ticks: Ticks) -> u64 {
        ticks as u64 * 1000 / self.tick_hz as u64
    }
}
