//! GPIO / peripheral pin assignments for the Firewatch controller board.
//!
//! `esp-idf-hal` hands out pins as distinct types, so `main` takes them by
//! name (`gpio4`, ...) and these numbers cannot drive that wiring.  They
//! are logged at boot and must be edited together with `main`.

// ---------------------------------------------------------------------------
// Extinguisher motor driver (DRV8871 H-bridge)
// ---------------------------------------------------------------------------

/// LEDC PWM output for motor speed.
pub const MOTOR_PWM_GPIO: i32 = 1;
/// Digital output: HIGH = outward (toward the lever), LOW = return.
pub const MOTOR_DIR_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Limit switches (close to ground, internal pull-up)
// ---------------------------------------------------------------------------

/// Pressed when the lever end of travel is reached.
pub const OUTWARD_SWITCH_GPIO: i32 = 4;
/// Pressed when the motor is back at its rest position.
pub const RETURN_SWITCH_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Fire sensor (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor, 10 kOhm @ 25 C, voltage divider to ADC1 channel 8.
pub const THERMISTOR_ADC_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 - 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Full-scale LEDC duty at [`PWM_RESOLUTION_BITS`].
pub const PWM_MAX_DUTY: u16 = (1 << PWM_RESOLUTION_BITS) - 1;
/// LEDC base frequency for the motor (25 kHz, inaudible).
pub const MOTOR_PWM_FREQ_HZ: u32 = 25_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_duty_follows_resolution() {
        assert_eq!(PWM_MAX_DUTY, 255);
    }

    #[test]
    fn no_pin_is_assigned_twice() {
        let mut gpios = [
            MOTOR_PWM_GPIO,
            MOTOR_DIR_GPIO,
            OUTWARD_SWITCH_GPIO,
            RETURN_SWITCH_GPIO,
            THERMISTOR_ADC_GPIO,
        ];
        gpios.sort_unstable();
        assert!(gpios.windows(2).all(|w| w[0] != w[1]));
    }
}
