//! Application core: the periodic tasks and how they are wired.
//!
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`] (plus `embedded-hal` input pins), keeping this layer fully
//! testable without real peripherals.

pub mod ports;
pub mod system;
pub mod tasks;
