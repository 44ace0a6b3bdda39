//! Extinguish sequencer: owns the motor and closes the cycle.
//!
//! ```text
//!  phase        motor command      phase write
//!  ─────────    ───────────────    ─────────────────────
//!  IDLE         stop               -
//!  IGNITE       drive outward      -   (outward switch ends it)
//!  RETURNING    drive back         -   (return switch ends it)
//!  HOME         stop               HOME → IDLE once stopped
//!  other        unchanged          -
//! ```
//!
//! The command is a pure function of the phase, so re-reading an
//! unchanged phase is harmless.  The driver is only called when the
//! requested motion differs from the last one applied; a failed command
//! is retried next period.  A return stroke that never reaches its
//! switch keeps the motor in `RETURNING`: no timeout is applied here.

use log::{debug, warn};

use super::PeriodicTask;
use crate::app::ports::{MotorDrive, MotorPort};
use crate::clock::Ticks;
use crate::fsm::{CYCLE_RESET, Phase, PhaseCell};

pub struct ExtinguishSequencer<'a, M> {
    motor: M,
    phase: &'a PhaseCell,
    duty: u8,
    period: Ticks,
    /// Last drive the motor accepted; `None` until the first success.
    applied: Option<MotorDrive>,
}

impl<'a, M: MotorPort> ExtinguishSequencer<'a, M> {
    pub fn new(motor: M, phase: &'a PhaseCell, duty_percent: u8, period: Ticks) -> Self {
        Self {
            motor,
            phase,
            duty: duty_percent.min(100),
            period,
            applied: None,
        }
    }

    /// Motor command the sequencer wants for `phase`, or `None` if the
    /// phase is not part of the cycle.
    pub fn drive_for(&self, phase: Phase) -> Option<MotorDrive> {
        match phase {
            Phase::IDLE | Phase::HOME => Some(MotorDrive::Stopped),
            Phase::IGNITE => Some(MotorDrive::Outward { duty: self.duty }),
            Phase::RETURNING => Some(MotorDrive::Return { duty: self.duty }),
            _ => None,
        }
    }

    /// One activation.  Returns `true` if this call wrote the phase.
    pub fn step(&mut self) -> bool {
        let phase = self.phase.get();
        let Some(wanted) = self.drive_for(phase) else {
            return false;
        };

        if !self.apply(wanted) {
            return false;
        }

        phase == CYCLE_RESET.from && CYCLE_RESET.fire(self.phase)
    }

    /// Last drive the motor accepted.
    pub fn applied(&self) -> Option<MotorDrive> {
        self.applied
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Give the motor driver back.
    pub fn release(self) -> M {
        self.motor
    }

    fn apply(&mut self, wanted: MotorDrive) -> bool {
        if self.applied == Some(wanted) {
            return true;
        }
        match self.motor.drive(wanted) {
            Ok(()) => {
                debug!("Sequencer: motor {:?} -> {:?}", self.applied, wanted);
                self.applied = Some(wanted);
                true
            }
            Err(e) => {
                warn!("Sequencer: motor command {:?} failed ({}), retrying", wanted, e);
                self.applied = None;
                false
            }
        }
    }
}

impl<M: MotorPort> PeriodicTask for ExtinguishSequencer<'_, M> {
    fn name(&self) -> &'static str {
        CYCLE_RESET.writer
    }

    fn period(&self) -> Ticks {
        self.period
    }

    fn run_once(&mut self) {
        self.step();
    }
}
