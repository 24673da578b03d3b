//! Error types for the Subcount hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when interacting with the hardware.
#[derive(Error, Debug)]
pub enum Error {
    /// Matrix serial bridge not found or could not be opened.
    #[error("LED matrix not found at {0}")]
    MatrixNotFound(String),

    /// Indicator serial bridge not found or could not be opened.
    #[error("Indicator not found at {0}")]
    IndicatorNotFound(String),

    /// Serial port communication error.
    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// Serial I/O error.
    #[error("Serial I/O error: {0}")]
    SerialIo(#[from] std::io::Error),

    /// Matrix intensity outside the MAX7219 range.
    #[error("Invalid matrix intensity (must be 0-15): {0}")]
    InvalidIntensity(u8),

    /// Colour string that is not `#RRGGBB`.
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    /// Module count that does not fit a frame.
    #[error("Invalid module count (must be 1-{max}): {count}")]
    InvalidModuleCount { count: u8, max: u8 },

    /// Surface dimensions do not match the module chain.
    #[error("Surface size mismatch: expected {expected}x8, got {actual}x{height}")]
    SurfaceSize {
        expected: u16,
        actual: u16,
        height: u16,
    },
}
