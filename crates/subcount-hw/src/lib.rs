//! Subcount Hardware Library
//!
//! Provides hardware abstraction for chained MAX7219 LED matrix panels and
//! single-pixel status indicators, both reached through USB serial bridges.

pub mod error;
pub mod indicator;
pub mod matrix;

pub use error::{Error, Result};
pub use indicator::{IndicatorDevice, Rgb};
pub use matrix::{MatrixDevice, Surface};

/// Pixels per matrix module edge.
pub const MODULE_SIZE: u16 = 8;

/// Modules in the default chain.
pub const DEFAULT_MODULES: u8 = 4;

/// Default panel dimensions (four chained 8x8 modules).
pub const MATRIX_WIDTH: u16 = MODULE_SIZE * DEFAULT_MODULES as u16;
pub const MATRIX_HEIGHT: u16 = MODULE_SIZE;
