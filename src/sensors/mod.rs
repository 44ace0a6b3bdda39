//! Fire sensing drivers.
//!
//! Each driver implements [`TemperatureSource`](crate::app::ports::TemperatureSource)
//! so the thermal watch task never touches an ADC directly.

pub mod thermistor;

pub use thermistor::{AdcSample, Thermistor};
