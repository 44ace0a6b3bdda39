//! Mechanical limit-switch tasks bounding the extinguisher motor's travel.
//!
//! ## Hardware
//!
//! Each switch closes to ground with the input's internal pull-up
//! enabled: logic low = pressed, logic high = released.
//!
//! ## Behaviour
//!
//! Every period the task checks the shared phase.  Only while the phase
//! equals the switch's guard is the input sampled; a pressed sample
//! advances the phase to its successor.  Outside that window the switch
//! is ignored entirely, so a lever resting on the switch while idle (or
//! while travelling the other way) cannot cause a transition.
//!
//! | Task            | Guard          | On press        |
//! |-----------------|----------------|-----------------|
//! | outward travel  | `IGNITE` (1)   | → `RETURNING`   |
//! | return travel   | `RETURNING` (2)| → `HOME` (3)    |
//!
//! There is no debounce and no timeout here: a single low sample is a
//! press, and a switch that never closes leaves the phase where it is.

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

use super::PeriodicTask;
use crate::clock::Ticks;
use crate::fsm::{OUTWARD_COMPLETE, PhaseCell, RETURN_COMPLETE, Transition};

/// Polls one active-low limit switch and owns one phase edge.
pub struct LimitSwitchTask<'a, P> {
    pin: P,
    phase: &'a PhaseCell,
    edge: Transition,
    period: Ticks,
}

impl<'a, P: InputPin> LimitSwitchTask<'a, P> {
    /// Switch that advances `edge.from → edge.to` when pressed.
    pub fn new(pin: P, phase: &'a PhaseCell, edge: Transition, period: Ticks) -> Self {
        Self {
            pin,
            phase,
            edge,
            period,
        }
    }

    /// Switch at the rest end of travel: signals the motor has returned.
    pub fn return_travel(pin: P, phase: &'a PhaseCell, period: Ticks) -> Self {
        Self::new(pin, phase, RETURN_COMPLETE, period)
    }

    /// Switch at the lever end of travel: signals the lever is pulled.
    pub fn outward_travel(pin: P, phase: &'a PhaseCell, period: Ticks) -> Self {
        Self::new(pin, phase, OUTWARD_COMPLETE, period)
    }

    /// The phase edge this switch owns.
    pub fn edge(&self) -> Transition {
        self.edge
    }

    /// One poll.  Returns `true` if this call wrote the phase.
    pub fn poll(&mut self) -> bool {
        if self.phase.get() != self.edge.from {
            return false;
        }
        if !self.is_pressed() {
            return false;
        }
        self.edge.fire(self.phase)
    }

    /// Give the input pin back (e.g. to reconfigure it).
    pub fn release(self) -> P {
        self.pin
    }

    /// Active-low sample.  A failed read counts as "not pressed" and is
    /// retried next period.
    fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                warn!("{}: input read failed ({:?})", self.edge.writer, e.kind());
                false
            }
        }
    }
}

impl<P: InputPin> PeriodicTask for LimitSwitchTask<'_, P> {
    fn name(&self) -> &'static str {
        self.edge.writer
    }

    fn period(&self) -> Ticks {
        self.period
    }

    fn run_once(&mut self) {
        self.poll();
    }
}
