//! Core-pinned periodic task spawning for ESP32-S3 dual-core.
//!
//! Each periodic task gets its own FreeRTOS task (via `std::thread`,
//! which ESP-IDF implements on pthreads) with an explicit priority, stack
//! size and core.  `esp_pthread_set_cfg()` sets thread-local
//! configuration that applies to the *next* `pthread_create()` from the
//! calling thread, so the config→spawn pair must not be interleaved with
//! other thread creation on the same thread.
//!
//! On non-ESP targets the priority and core are ignored and a plain
//! thread is spawned; the absolute-deadline loop is unchanged.

use std::thread::JoinHandle;

use crate::app::tasks::{PeriodicTask, run_periodic};
use crate::clock::TickClock;
use crate::error::{Error, Result};

/// CPU core identifiers for the ESP32-S3 Xtensa LX7 dual-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU), protocol stacks.
    Pro = 0,
    /// Core 1 (APP_CPU), the extinguish cycle.
    App = 1,
}

/// Scheduling parameters for one periodic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    /// Null-terminated thread name (e.g. `"return-sw\0"`).
    pub thread_name: &'static str,
    /// FreeRTOS priority; higher runs first.
    pub priority: u8,
    pub stack_kb: usize,
    pub core: Core,
}

impl TaskSpec {
    /// Thread name without the terminator.
    pub fn display_name(&self) -> &'static str {
        self.thread_name.trim_end_matches('\0')
    }
}

/// Spawn `task` as its own thread, looping on its period against `clock`.
///
/// A task with a zero period is refused before any thread is created.
pub fn spawn_periodic<T, C>(spec: &TaskSpec, task: T, clock: C) -> Result<JoinHandle<()>>
where
    T: PeriodicTask + Send + 'static,
    C: TickClock + Send + 'static,
{
    if task.period() == 0 {
        log::error!("Task '{}' has a zero period", spec.display_name());
        return Err(Error::Init("task period must be non-zero"));
    }
    spawn_on_core(spec, move || run_periodic(task, clock))
}

#[cfg(target_os = "espidf")]
fn spawn_on_core(spec: &TaskSpec, f: impl FnOnce() + Send + 'static) -> Result<JoinHandle<()>> {
    let ret = unsafe {
        let mut cfg = esp_idf_svc::sys::esp_create_default_pthread_config();
        cfg.pin_to_core = spec.core as i32;
        cfg.prio = spec.priority as i32;
        cfg.stack_size = (spec.stack_kb * 1024) as i32;
        cfg.thread_name = spec.thread_name.as_ptr() as *const _;
        esp_idf_svc::sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != esp_idf_svc::sys::ESP_OK as i32 {
        log::error!("esp_pthread_set_cfg failed: {ret}");
        return Err(Error::Init("esp_pthread_set_cfg failed"));
    }

    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        spec.display_name(),
        spec.core,
        spec.priority,
        spec.stack_kb
    );

    std::thread::Builder::new()
        .name(spec.display_name().into())
        .spawn(f)
        .map_err(|_| Error::Init("thread creation failed"))
}

/// Simulation fallback: ignores core affinity and priority.
#[cfg(not(target_os = "espidf"))]
fn spawn_on_core(spec: &TaskSpec, f: impl FnOnce() + Send + 'static) -> Result<JoinHandle<()>> {
    log::info!(
        "Spawning '{}' (sim, no core pinning, stack={}KB)",
        spec.display_name(),
        spec.stack_kb
    );

    std::thread::Builder::new()
        .name(spec.display_name().into())
        .stack_size(spec.stack_kb * 1024)
        .spawn(f)
        .map_err(|_| Error::Init("thread creation failed"))
}
