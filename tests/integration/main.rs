//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the extinguish cycle
//! against mock hardware.  All tests run on the host (x86_64) with no
//! real hardware required.

#![cfg(not(target_os = "espidf"))]

mod cycle_tests;
mod mock_hw;
mod return_switch_tests;
mod threaded_tests;
