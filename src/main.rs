//! Firewatch Firmware: Main Entry Point
//!
//! Four periodic FreeRTOS tasks on the APP core, coordinated only through
//! one shared extinguish phase.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                    Peripherals (esp-idf-hal)                   │
//! │                                                                │
//! │  ADC1 oneshot     GPIO4 / GPIO5      LEDC ch0 + GPIO2          │
//! │  (Thermistor)     (limit switches)   (ExtinguisherMotor)       │
//! │                                                                │
//! │  ──────────────── Task / Port Boundary ─────────────────       │
//! │                                                                │
//! │   thermal (4)   outward-sw (6)   return-sw (6)   sequencer (5) │
//! │        └─────────────┴───── PhaseCell ─┴──────────────┘        │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use log::info;

use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;

use firewatch::adapters::time::FreeRtosClock;
use firewatch::app::system::ExtinguishSystem;
use firewatch::config::SystemConfig;
use firewatch::drivers::motor::ExtinguisherMotor;
use firewatch::fsm::{Phase, PhaseCell};
use firewatch::pins;
use firewatch::sensors::Thermistor;

/// The LEDC timer below is configured with `Resolution::Bits8`.
const _: () = assert!(pins::PWM_RESOLUTION_BITS == 8);

/// The extinguish phase shared by all four tasks.
static EXTINGUISH_PHASE: PhaseCell = PhaseCell::new(Phase::IDLE);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Firewatch v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    config.check_kernel_tick_rate(esp_idf_svc::sys::configTICK_RATE_HZ)?;
    info!(
        "Config: fire >= {:.1} C, duty {}%, switch period {} ms",
        config.fire_threshold_c,
        config.motor_duty_percent,
        config.ticks_to_ms(config.return_switch_period_ticks)
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    let mut outward_pin = PinDriver::input(peripherals.pins.gpio4)?;
    outward_pin.set_pull(Pull::Up)?;
    let mut return_pin = PinDriver::input(peripherals.pins.gpio5)?;
    return_pin.set_pull(Pull::Up)?;

    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(pins::MOTOR_PWM_FREQ_HZ))
            .resolution(Resolution::Bits8),
    )?;
    let pwm = LedcDriver::new(peripherals.ledc.channel0, timer, peripherals.pins.gpio1)?;
    let dir = PinDriver::output(peripherals.pins.gpio2)?;
    let motor = ExtinguisherMotor::new(pwm, dir)?;

    let adc = AdcDriver::new(peripherals.adc1)?;
    let adc_config = AdcChannelConfig {
        attenuation: DB_11,
        ..Default::default()
    };
    let mut thermistor_chan = AdcChannelDriver::new(adc, peripherals.pins.gpio9, &adc_config)?;
    let sensor = Thermistor::new(move || thermistor_chan.read_raw().ok());

    info!(
        "Pins: outward-sw={} return-sw={} pwm={} dir={} ntc={}",
        pins::OUTWARD_SWITCH_GPIO,
        pins::RETURN_SWITCH_GPIO,
        pins::MOTOR_PWM_GPIO,
        pins::MOTOR_DIR_GPIO,
        pins::THERMISTOR_ADC_GPIO
    );

    // ── 4. Tasks ──────────────────────────────────────────────
    let system = ExtinguishSystem::new(
        &config,
        &EXTINGUISH_PHASE,
        sensor,
        outward_pin,
        return_pin,
        motor,
    )?;
    let handles = system.spawn(FreeRtosClock)?;
    info!("Phase: {}", EXTINGUISH_PHASE.get());

    // The tasks never return; joining keeps `main`'s stack alive.
    for handle in handles {
        if handle.join().is_err() {
            log::error!("Periodic task panicked");
        }
    }
    Ok(())
}
