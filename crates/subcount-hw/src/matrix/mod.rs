//! LED matrix module.
//!
//! Provides control over a chain of MAX7219-driven 8x8 modules via a
//! serial bridge.

mod device;
mod protocol;

pub mod surface;

pub use device::MatrixDevice;
pub use protocol::{Register, MAX_MODULES};
pub use surface::Surface;
