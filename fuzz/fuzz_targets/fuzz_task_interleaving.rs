//! Fuzz target: arbitrary interleavings of the four periodic tasks.
//!
//! Each input byte selects one activation (low two bits: which task) and
//! the hardware level it sees (bit 2).  Every phase change must be the
//! table edge leaving the current phase, and the shared phase must never
//! leave the four-code cycle.
//!
//! cargo fuzz run fuzz_task_interleaving

#![no_main]

use firewatch::app::ports::{MotorDrive, MotorPort, TemperatureSource};
use firewatch::app::tasks::{ExtinguishSequencer, LimitSwitchTask, ThermalWatchTask};
use firewatch::drivers::sim::SimInput;
use firewatch::error::MotorError;
use firewatch::fsm::{Phase, PhaseCell, Transition};
use libfuzzer_sys::fuzz_target;

struct Heat(f32);

impl TemperatureSource for Heat {
    fn read_celsius(&mut self) -> Option<f32> {
        Some(self.0)
    }
}

/// Rejects every command whose input byte had bit 3 set.
struct FlakyMotor(bool);

impl MotorPort for FlakyMotor {
    fn drive(&mut self, _drive: MotorDrive) -> Result<(), MotorError> {
        if self.0 { Err(MotorError::PwmWriteFailed) } else { Ok(()) }
    }
}

fuzz_target!(|data: &[u8]| {
    let phase = PhaseCell::new(Phase::IDLE);
    let outward_pin = SimInput::pulled_up();
    let return_pin = SimInput::pulled_up();
    let mut thermal = ThermalWatchTask::new(Heat(20.0), &phase, 60.0, 250);
    let mut outward = LimitSwitchTask::outward_travel(outward_pin.clone(), &phase, 100);
    let mut ret = LimitSwitchTask::return_travel(return_pin.clone(), &phase, 100);
    let mut sequencer = ExtinguishSequencer::new(FlakyMotor(false), &phase, 80, 50);
    let mut motor_fails = false;

    for byte in data {
        let level = byte & 0b100 != 0;
        let before = phase.get();
        let writer = match byte & 0b11 {
            0 => {
                thermal.sensor_mut().0 = if level { 75.0 } else { 20.0 };
                thermal.poll().then_some(Transition::leaving(before))
            }
            1 => {
                outward_pin.set_level(!level);
                outward.poll().then_some(Transition::leaving(before))
            }
            2 => {
                return_pin.set_level(!level);
                ret.poll().then_some(Transition::leaving(before))
            }
            _ => {
                // Toggle the motor fault on bit 3 by rebuilding the sequencer
                // only when the requested fault state changes.
                let fail = byte & 0b1000 != 0;
                if fail != motor_fails {
                    sequencer = ExtinguishSequencer::new(FlakyMotor(fail), &phase, 80, 50);
                    motor_fails = fail;
                }
                sequencer.step().then_some(Transition::leaving(before))
            }
        };

        let after = phase.get();
        match writer {
            Some(edge) => {
                let edge = edge.expect("a task wrote a phase with no table edge");
                assert_eq!((edge.from, edge.to), (before, after));
            }
            None => assert_eq!(before, after, "phase changed without a reported write"),
        }
        assert!(after.code() <= Phase::HOME.code());
    }
});
