//! NTC thermistor fire sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired on the low side of a voltage divider under a fixed 10 kOhm
//! resistor and read through a 12-bit ADC.  Heat lowers the NTC
//! resistance and with it the divider voltage.  The simplified Beta
//! (Steinhart-Hart) equation converts resistance to temperature.
//!
//! The ADC itself is abstracted behind [`AdcSample`] so the same
//! conversion runs against the ESP32-S3 oneshot ADC or a test closure.

use crate::app::ports::TemperatureSource;

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

/// Raw ADC access.  `None` on a failed conversion.
pub trait AdcSample {
    fn sample(&mut self) -> Option<u16>;
}

impl<F: FnMut() -> Option<u16>> AdcSample for F {
    fn sample(&mut self) -> Option<u16> {
        self()
    }
}

pub struct Thermistor<A> {
    adc: A,
}

impl<A: AdcSample> Thermistor<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Convert a raw 12-bit sample to Celsius.  A rail-pinned reading
    /// (open or shorted thermistor) yields `None`.
    pub fn adc_to_celsius(raw: u16) -> Option<f32> {
        let voltage = (raw as f32 / ADC_MAX) * V_REF;
        if voltage <= 0.01 || voltage >= (V_REF - 0.01) {
            return None;
        }
        let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
        let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
        if inv_t <= 0.0 {
            return None;
        }
        Some((1.0 / inv_t) - 273.15)
    }
}

impl<A: AdcSample> TemperatureSource for Thermistor<A> {
    fn read_celsius(&mut self) -> Option<f32> {
        self.adc.sample().and_then(Self::adc_to_celsius)
    }
}
