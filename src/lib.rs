/*
    Two-wheel differential drive core with quadrature feedback, per-wheel
    velocity PID and a bounded oscillating stepper.

    Everything here is hardware independent and runs on the host under
    `cargo test`. The RP2040 firmware in `main.rs` wires it to embassy tasks.
*/

#![cfg_attr(not(test), no_std)]

pub mod control;
pub mod devices;
pub mod error;
pub mod resources;

pub use error::Error;
pub use error::Result;
