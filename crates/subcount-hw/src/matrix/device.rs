//! LED matrix communication via a serial bridge.

use crate::{Error, Result};
use tokio::io::AsyncWriteExt;
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::{debug, info};

use super::protocol::{
    build_broadcast, build_init_sequence, build_row_frame, Register, MAX_MODULES,
};
use super::surface::Surface;

/// Matrix bridge baud rate.
const BAUD_RATE: u32 = 115_200;

/// Highest MAX7219 intensity step.
const MAX_INTENSITY: u8 = 15;

/// LED matrix controller.
pub struct MatrixDevice {
    port: SerialStream,
    port_path: String,
    modules: u8,
}

impl MatrixDevice {
    /// Opens the serial bridge for a chain of `modules` matrices.
    pub fn open(port_path: &str, modules: u8) -> Result<Self> {
        if modules == 0 || modules > MAX_MODULES {
            return Err(Error::InvalidModuleCount {
                count: modules,
                max: MAX_MODULES,
            });
        }

        let port = tokio_serial::new(port_path, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .open_native_async()
            .map_err(|e| {
                if !std::path::Path::new(port_path).exists() {
                    return Error::MatrixNotFound(port_path.to_string());
                }
                Error::Serial(e)
            })?;

        info!("LED matrix opened at {} ({} modules)", port_path, modules);

        Ok(Self {
            port,
            port_path: port_path.to_string(),
            modules,
        })
    }

    async fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        debug!("Sending matrix frame to {}: {:02X?}", self.port_path, frame);
        self.port.write_all(frame).await?;
        Ok(())
    }

    fn check_intensity(intensity: u8) -> Result<u8> {
        if intensity > MAX_INTENSITY {
            return Err(Error::InvalidIntensity(intensity));
        }
        Ok(intensity)
    }

    /// Runs the register bring-up sequence.
    pub async fn init(&mut self, intensity: u8, enabled: bool) -> Result<()> {
        let intensity = Self::check_intensity(intensity)?;
        for frame in build_init_sequence(self.modules, intensity, enabled) {
            self.send_frame(&frame).await?;
        }
        self.port.flush().await?;
        info!(
            "LED matrix initialized (intensity: {}, enabled: {})",
            intensity, enabled
        );
        Ok(())
    }

    /// Sets the brightness of every module (0-15).
    pub async fn set_intensity(&mut self, intensity: u8) -> Result<()> {
        let intensity = Self::check_intensity(intensity)?;
        let frame = build_broadcast(Register::Intensity, intensity, self.modules);
        self.send_frame(&frame).await?;
        self.port.flush().await?;
        info!("LED matrix intensity set to {}", intensity);
        Ok(())
    }

    /// Takes every module in or out of shutdown.
    pub async fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        let frame = build_broadcast(Register::Shutdown, enabled as u8, self.modules);
        self.send_frame(&frame).await?;
        self.port.flush().await?;
        info!("LED matrix {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Writes the surface to the panel, one frame per row.
    pub async fn flush(&mut self, surface: &Surface) -> Result<()> {
        if surface.modules() != self.modules as u16 {
            return Err(Error::SurfaceSize {
                expected: self.modules as u16 * crate::MODULE_SIZE,
                actual: surface.width(),
                height: surface.height(),
            });
        }

        for row in 0..surface.height() {
            let frame = build_row_frame(surface, row, self.modules);
            self.send_frame(&frame).await?;
        }
        self.port.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_intensity() {
        assert_eq!(MatrixDevice::check_intensity(0).unwrap(), 0);
        assert_eq!(MatrixDevice::check_intensity(15).unwrap(), 15);
        assert!(MatrixDevice::check_intensity(16).is_err());
    }

    #[test]
    fn test_open_rejects_bad_module_count() {
        match MatrixDevice::open("/dev/null", 0) {
            Err(Error::InvalidModuleCount { count: 0, .. }) => {}
            _ => panic!("expected InvalidModuleCount"),
        }
    }
}
