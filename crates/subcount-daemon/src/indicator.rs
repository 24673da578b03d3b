//! Status indicator: a white/blue pulse on subscriber gains.
//!
//! Indicator failures are logged and otherwise ignored; the display loop
//! never depends on the indicator being present.

use subcount_hw::{IndicatorDevice, Rgb};
use tracing::warn;

use crate::config::IndicatorConfig;

/// Fire-and-forget wrapper around the indicator pixel.
pub struct Indicator {
    device: IndicatorDevice,
    on: Rgb,
    rest: Rgb,
}

fn parse_color(value: &str, fallback: Rgb) -> Rgb {
    value.parse().unwrap_or_else(|e| {
        warn!("{}, using {}", e, fallback);
        fallback
    })
}

impl Indicator {
    /// Creates the indicator from configuration.
    pub fn new(config: &IndicatorConfig) -> Self {
        Self {
            device: IndicatorDevice::new(&config.device, config.brightness),
            on: parse_color(&config.on, Rgb::WHITE),
            rest: parse_color(&config.rest, Rgb::BLUE),
        }
    }

    /// Lights the indicator in its "on" colour.
    pub async fn show_on(&self) {
        if let Err(e) = self.device.set_color(self.on).await {
            warn!("Indicator update failed: {}", e);
        }
    }

    /// Turns the indicator off.
    pub async fn off(&self) {
        if let Err(e) = self.device.set_off().await {
            warn!("Indicator update failed: {}", e);
        }
    }

    /// Runs a full pulse, blocking until it finishes.
    pub async fn pulse(&self) {
        if let Err(e) = self.device.pulse_with(self.on, self.rest).await {
            warn!("Indicator pulse failed: {}", e);
        }
    }
}
