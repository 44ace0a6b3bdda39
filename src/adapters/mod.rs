//! Adapters: concrete implementations of the scheduler-facing traits.
//!
//! | Adapter | Implements  | Connects to                         |
//! |---------|-------------|-------------------------------------|
//! | `time`  | `TickClock` | FreeRTOS tick / `Instant` / manual  |

pub mod time;
