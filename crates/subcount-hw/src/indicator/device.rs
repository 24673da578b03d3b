//! Indicator pixel communication via serial port.

use crate::{Error, Result};
use std::str::FromStr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, StopBits};
use tracing::{debug, info};

/// Indicator signature byte.
const SIGNATURE_BYTE: u8 = 0xFA;

/// Indicator baud rate.
const BAUD_RATE: u32 = 9600;

/// Time each colour of a pulse is held.
pub const PULSE_STEP: Duration = Duration::from_millis(500);

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scales every channel by `brightness / 255`.
    pub fn scaled(self, brightness: u8) -> Self {
        let scale = |c: u8| ((c as u16 * brightness as u16) / 255) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parses `#RRGGBB` or `RRGGBB`.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim_start_matches('#');
        let invalid = || Error::InvalidColor(s.to_string());
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colours shown by a pulse, each held for [`PULSE_STEP`].
fn pulse_sequence(on: Rgb, rest: Rgb) -> [Rgb; 5] {
    [on, rest, on, rest, on]
}

/// Indicator pixel controller.
pub struct IndicatorDevice {
    port_path: String,
    brightness: u8,
}

impl IndicatorDevice {
    /// Creates a new indicator controller.
    pub fn new(port_path: &str, brightness: u8) -> Self {
        Self {
            port_path: port_path.to_string(),
            brightness,
        }
    }

    /// Opens the serial port and sends data.
    async fn send_packet(&self, packet: [u8; 5]) -> Result<()> {
        let mut port = tokio_serial::new(&self.port_path, BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .open_native_async()
            .map_err(|e| {
                if !std::path::Path::new(&self.port_path).exists() {
                    return Error::IndicatorNotFound(self.port_path.clone());
                }
                Error::Serial(e)
            })?;

        debug!("Sending indicator packet to {}: {:02X?}", self.port_path, packet);

        port.write_all(&packet).await?;
        port.flush().await?;
        Ok(())
    }

    /// Calculates checksum for the packet.
    fn checksum(packet: &[u8; 4]) -> u8 {
        packet.iter().fold(0u8, |acc, &x| acc.wrapping_add(x))
    }

    /// Builds a 5-byte colour packet with brightness applied.
    fn build_packet(color: Rgb, brightness: u8) -> [u8; 5] {
        let color = color.scaled(brightness);
        let base = [SIGNATURE_BYTE, color.r, color.g, color.b];
        let checksum = Self::checksum(&base);
        [base[0], base[1], base[2], base[3], checksum]
    }

    /// Sets the indicator colour.
    pub async fn set_color(&self, color: Rgb) -> Result<()> {
        let packet = Self::build_packet(color, self.brightness);
        self.send_packet(packet).await?;
        debug!("Indicator set to {}", color);
        Ok(())
    }

    /// Alternates `on` and `rest`, holding each colour for [`PULSE_STEP`],
    /// ending on `on`.
    ///
    /// Blocks the caller for the whole pulse.
    pub async fn pulse_with(&self, on: Rgb, rest: Rgb) -> Result<()> {
        for (i, color) in pulse_sequence(on, rest).iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(PULSE_STEP).await;
            }
            self.set_color(*color).await?;
        }
        info!("Indicator pulsed ({} / {})", on, rest);
        Ok(())
    }

    /// Turns off the indicator.
    pub async fn set_off(&self) -> Result<()> {
        self.set_color(Rgb::OFF).await
    }
}
