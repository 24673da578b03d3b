//! Configuration management.

#![allow(dead_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum time between stats fetches in milliseconds
    #[serde(default = "default_poll")]
    pub poll: u64,

    /// Delay after every rendered frame in milliseconds
    #[serde(default = "default_tick")]
    pub tick: u64,

    /// Path of the persisted credentials and counts
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Matrix panel configuration
    #[serde(default)]
    pub panel: PanelConfig,

    /// Indicator pixel configuration
    #[serde(default)]
    pub indicator: IndicatorConfig,

    /// Scroll configuration
    #[serde(default)]
    pub scroll: ScrollConfig,

    /// Stats source configuration
    #[serde(default)]
    pub source: SourceConfig,
}

/// Matrix panel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Serial bridge path
    #[serde(default = "default_panel_device")]
    pub device: String,

    /// Number of chained 8x8 modules
    #[serde(default = "default_modules")]
    pub modules: u8,

    /// Brightness (0-15)
    #[serde(default = "default_intensity")]
    pub intensity: u8,

    /// Whether the panel is lit
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Write every changed frame to this PNG file
    #[serde(default)]
    pub png: Option<String>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            device: default_panel_device(),
            modules: default_modules(),
            intensity: default_intensity(),
            enabled: default_true(),
            png: None,
        }
    }
}

/// Indicator pixel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Serial bridge path
    #[serde(default = "default_indicator_device")]
    pub device: String,

    /// Brightness (0-255)
    #[serde(default = "default_brightness")]
    pub brightness: u8,

    /// Pulse "on" colour
    #[serde(default = "default_on_color")]
    pub on: String,

    /// Pulse "rest" colour
    #[serde(default = "default_rest_color")]
    pub rest: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            device: default_indicator_device(),
            brightness: default_brightness(),
            on: default_on_color(),
            rest: default_rest_color(),
        }
    }
}

/// How the scroll offset is applied to the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// Counter stays put; the offset is tracked but not drawn.
    #[default]
    Fixed,
    /// Counter moves with the offset.
    Marquee,
}

/// Scroll configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Offset the content re-enters from after wrapping
    #[serde(default = "default_reset_x")]
    pub reset_x: i32,

    /// Pixels moved per tick
    #[serde(default = "default_step")]
    pub step: i32,

    /// Width per character used for the wrap distance
    #[serde(default = "default_cell_width")]
    pub cell_width: i32,

    /// Whether the offset moves the counter
    #[serde(default)]
    pub mode: ScrollMode,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            reset_x: default_reset_x(),
            step: default_step(),
            cell_width: default_cell_width(),
            mode: ScrollMode::default(),
        }
    }
}

/// Stats source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// JSON stats file kept current by the fetcher
    #[serde(default = "default_source_path")]
    pub path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
        }
    }
}

// Default value functions
fn default_poll() -> u64 {
    60000
}

fn default_tick() -> u64 {
    100
}

fn default_state_file() -> String {
    "/var/lib/subcount/config.json".to_string()
}

fn default_panel_device() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_modules() -> u8 {
    4
}

fn default_intensity() -> u8 {
    5
}

fn default_true() -> bool {
    true
}

fn default_indicator_device() -> String {
    "/dev/ttyUSB1".to_string()
}

fn default_brightness() -> u8 {
    200
}

fn default_on_color() -> String {
    "#FFFFFF".to_string()
}

fn default_rest_color() -> String {
    "#0000FF".to_string()
}

fn default_reset_x() -> i32 {
    31 // Rightmost column of a four-module panel
}

fn default_step() -> i32 {
    1
}

fn default_cell_width() -> i32 {
    8
}

fn default_source_path() -> String {
    "/run/subcount/stats.json".to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll: default_poll(),
            tick: default_tick(),
            state_file: default_state_file(),
            panel: PanelConfig::default(),
            indicator: IndicatorConfig::default(),
            scroll: ScrollConfig::default(),
            source: SourceConfig::default(),
        }
    }
}
