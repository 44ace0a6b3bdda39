//! Actuator drivers, task spawning, and host simulation peripherals.

pub mod motor;
#[cfg(not(target_os = "espidf"))]
pub mod sim;
pub mod task_pin;
