//! Status indicator module.
//!
//! Provides control over a single addressable RGB pixel via serial.

mod device;

pub use device::{IndicatorDevice, Rgb, PULSE_STEP};
