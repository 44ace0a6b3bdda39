//! Extinguisher actuation motor driver (DRV8871-style H-bridge).
//!
//! Variable-speed outward/return control via one PWM channel and a
//! digital direction pin.
//!
//! ## Safety contract
//!
//! Travel is bounded by the two limit switches, which the sequencer
//! observes through the shared phase; this driver is a dumb actuator and
//! never stops itself.
//!
//! ## Direction changes
//!
//! PWM is cut before the direction pin flips, so the bridge never sees a
//! reversal under load.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{MotorDrive, MotorPort};
use crate::error::MotorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Direction pin HIGH: toward the extinguisher lever.
    Outward,
    /// Direction pin LOW: toward the rest position.
    Return,
}

pub struct ExtinguisherMotor<P, D> {
    pwm: P,
    dir: D,
    state: MotorDrive,
    direction: Direction,
}

impl<P: SetDutyCycle, D: OutputPin> ExtinguisherMotor<P, D> {
    /// Take ownership of the PWM channel and direction pin and force the
    /// motor off.
    pub fn new(pwm: P, dir: D) -> Result<Self, MotorError> {
        let mut motor = Self {
            pwm,
            dir,
            state: MotorDrive::Stopped,
            direction: Direction::Return,
        };
        motor.stop()?;
        motor.set_direction_hw(Direction::Outward)?;
        Ok(motor)
    }

    pub fn state(&self) -> MotorDrive {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_moving()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn stop(&mut self) -> Result<(), MotorError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| MotorError::PwmWriteFailed)?;
        self.state = MotorDrive::Stopped;
        Ok(())
    }

    fn run(&mut self, direction: Direction, duty: u8) -> Result<(), MotorError> {
        let duty = duty.min(100);
        if duty == 0 {
            return self.stop();
        }
        if direction != self.direction {
            self.stop()?;
            self.set_direction_hw(direction)?;
        }
        self.pwm
            .set_duty_cycle_percent(duty)
            .map_err(|_| MotorError::PwmWriteFailed)?;
        self.state = match direction {
            Direction::Outward => MotorDrive::Outward { duty },
            Direction::Return => MotorDrive::Return { duty },
        };
        Ok(())
    }

    fn set_direction_hw(&mut self, direction: Direction) -> Result<(), MotorError> {
        let res = match direction {
            Direction::Outward => self.dir.set_high(),
            Direction::Return => self.dir.set_low(),
        };
        res.map_err(|_| MotorError::GpioWriteFailed)?;
        self.direction = direction;
        Ok(())
    }

    /// Give the PWM channel and direction pin back.
    pub fn release(self) -> (P, D) {
        (self.pwm, self.dir)
    }
}

impl<P: SetDutyCycle, D: OutputPin> MotorPort for ExtinguisherMotor<P, D> {
    fn drive(&mut self, drive: MotorDrive) -> Result<(), MotorError> {
        match drive {
            MotorDrive::Stopped => self.stop(),
            MotorDrive::Outward { duty } => self.run(Direction::Outward, duty),
            MotorDrive::Return { duty } => self.run(Direction::Return, duty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::sim::{SimOutput, SimPwm};
    use crate::pins::PWM_MAX_DUTY;

    fn motor() -> (ExtinguisherMotor<SimPwm, SimOutput>, SimPwm, SimOutput) {
        let pwm = SimPwm::new(PWM_MAX_DUTY);
        let dir = SimOutput::new(false);
        let m = ExtinguisherMotor::new(pwm.clone(), dir.clone()).unwrap();
        (m, pwm, dir)
    }

    #[test]
    fn starts_stopped_facing_outward() {
        let (m, pwm, dir) = motor();
        assert_eq!(m.state(), MotorDrive::Stopped);
        assert_eq!(pwm.duty(), 0);
        assert!(dir.is_set_high());
    }

    #[test]
    fn outward_then_return_flips_direction() {
        let (mut m, pwm, dir) = motor();

        m.drive(MotorDrive::Outward { duty: 100 }).unwrap();
        assert_eq!(pwm.duty(), 255);
        assert!(dir.is_set_high());

        m.drive(MotorDrive::Return { duty: 50 }).unwrap();
        assert_eq!(pwm.duty(), 127);
        assert!(!dir.is_set_high());
        assert_eq!(m.direction(), Direction::Return);
        assert!(m.is_running());
    }

    #[test]
    fn zero_duty_means_stop() {
        let (mut m, pwm, _) = motor();
        m.drive(MotorDrive::Outward { duty: 60 }).unwrap();
        m.drive(MotorDrive::Return { duty: 0 }).unwrap();
        assert_eq!(m.state(), MotorDrive::Stopped);
        assert_eq!(pwm.duty(), 0);
    }
}
