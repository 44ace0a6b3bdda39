//! Thermal watch task: declares a fire when the sensor crosses the
//! configured threshold while the system is idle.
//!
//! The sensor is only consulted in `IDLE`; once an extinguish cycle is
//! under way the reading has no effect until the sequencer closes the
//! cycle.  If the fire is still burning at that point, the next idle
//! period starts a fresh cycle.

use log::{debug, info};

use super::PeriodicTask;
use crate::app::ports::TemperatureSource;
use crate::clock::Ticks;
use crate::fsm::{FIRE_DETECTED, PhaseCell};

pub struct ThermalWatchTask<'a, S> {
    sensor: S,
    phase: &'a PhaseCell,
    threshold_c: f32,
    period: Ticks,
}

impl<'a, S: TemperatureSource> ThermalWatchTask<'a, S> {
    pub fn new(sensor: S, phase: &'a PhaseCell, threshold_c: f32, period: Ticks) -> Self {
        Self {
            sensor,
            phase,
            threshold_c,
            period,
        }
    }

    pub fn threshold_c(&self) -> f32 {
        self.threshold_c
    }

    /// One poll.  Returns `true` if this call wrote the phase.
    pub fn poll(&mut self) -> bool {
        if self.phase.get() != FIRE_DETECTED.from {
            return false;
        }

        match self.sensor.read_celsius() {
            Some(celsius) if celsius >= self.threshold_c => {
                info!(
                    "Thermal: {:.1}\u{00b0}C >= {:.1}\u{00b0}C, fire detected",
                    celsius, self.threshold_c
                );
                FIRE_DETECTED.fire(self.phase)
            }
            Some(_) => false,
            None => {
                debug!("Thermal: sensor read failed, retrying next period");
                false
            }
        }
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}

impl<S: TemperatureSource> PeriodicTask for ThermalWatchTask<'_, S> {
    fn name(&self) -> &'static str {
        FIRE_DETECTED.writer
    }

    fn period(&self) -> Ticks {
        self.period
    }

    fn run_once(&mut self) {
        self.poll();
    }
}
