//! Panel output: the LED matrix when present, plus an optional PNG mirror.

use anyhow::{Context, Result};
use std::path::PathBuf;
use subcount_hw::{MatrixDevice, Surface};
use tracing::{debug, info, warn};

use crate::config::PanelConfig;

/// Where composed frames go.
pub struct Panel {
    /// Matrix device (optional - may not be present)
    matrix: Option<MatrixDevice>,

    /// PNG mirror path
    png_path: Option<PathBuf>,

    /// Last frame written to the PNG mirror
    last_png: Option<Surface>,
}

impl Panel {
    /// Opens and initializes the matrix, falling back to headless mode.
    pub async fn open(config: &PanelConfig) -> Self {
        let matrix = match MatrixDevice::open(&config.device, config.modules) {
            Ok(mut device) => match device.init(config.intensity, config.enabled).await {
                Ok(()) => Some(device),
                Err(e) => {
                    warn!(
                        "Failed to initialize LED matrix: {}. Running in headless mode.",
                        e
                    );
                    None
                }
            },
            Err(e) => {
                warn!("LED matrix not found: {}. Running in headless mode.", e);
                None
            }
        };

        let png_path = config.png.as_ref().map(PathBuf::from);
        if let Some(ref path) = png_path {
            info!("Mirroring panel frames to {:?}", path);
        }

        Self {
            matrix,
            png_path,
            last_png: None,
        }
    }

    /// Returns true if the matrix device is connected.
    pub fn is_connected(&self) -> bool {
        self.matrix.is_some()
    }

    /// Sends a frame to the matrix and, if it changed, to the PNG mirror.
    pub async fn flush(&mut self, surface: &Surface) -> Result<()> {
        if let Some(ref mut matrix) = self.matrix {
            matrix.flush(surface).await?;
        }

        if let Some(ref path) = self.png_path {
            if self.last_png.as_ref() != Some(surface) {
                let png = encode_png(surface)?;
                std::fs::write(path, png).context("Failed to write panel PNG")?;
                debug!("Panel PNG updated");
                self.last_png = Some(surface.clone());
            }
        }

        Ok(())
    }

    /// Sets the matrix brightness.
    pub async fn set_intensity(&mut self, intensity: u8) -> Result<()> {
        if let Some(ref mut matrix) = self.matrix {
            matrix.set_intensity(intensity).await?;
        }
        Ok(())
    }

    /// Applies the brightness and on/off state from `config`.
    pub async fn apply(&mut self, config: &PanelConfig) -> Result<()> {
        self.set_intensity(config.intensity).await?;
        self.set_enabled(config.enabled).await
    }

    /// Takes the matrix in or out of shutdown.
    pub async fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if let Some(ref mut matrix) = self.matrix {
            matrix.set_enabled(enabled).await?;
        }
        Ok(())
    }
}

/// Encodes the surface as an 8-bit grayscale PNG.
pub fn encode_png(surface: &Surface) -> Result<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(
            &mut png_data,
            surface.width() as u32,
            surface.height() as u32,
        );
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&surface.to_luma8())?;
    }

    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png() {
        let mut surface = Surface::new();
        surface.set_pixel(3, 3, true);
        let png = encode_png(&surface).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoder = png::Decoder::new(png.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (32, 8));
        assert_eq!(buf[3 * 32 + 3], 255);
        assert_eq!(buf[0], 0);
    }

    #[tokio::test]
    async fn test_headless_panel_writes_png_on_change() {
        let path = std::env::temp_dir().join(format!("subcount-panel-{}.png", std::process::id()));
        let config = PanelConfig {
            device: "/nonexistent/subcount-matrix".to_string(),
            png: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let mut panel = Panel::open(&config).await;
        assert!(!panel.is_connected());

        let mut surface = Surface::new();
        panel.flush(&surface).await.unwrap();
        assert!(path.exists());

        std::fs::remove_file(&path).unwrap();
        panel.flush(&surface).await.unwrap();
        assert!(!path.exists(), "unchanged frame rewrote the PNG");

        surface.set_pixel(0, 0, true);
        panel.flush(&surface).await.unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_headless_settings_are_noops() {
        let config = PanelConfig {
            device: "/nonexistent/subcount-matrix".to_string(),
            intensity: 15,
            enabled: false,
            ..Default::default()
        };
        let mut panel = Panel::open(&config).await;
        panel.apply(&config).await.unwrap();
        panel.flush(&Surface::new()).await.unwrap();
    }
}
