//! MAX7219 chain protocol definitions and encoding.
//!
//! Frame structure sent to the serial bridge:
//! - Signature byte: 0xA5
//! - Pair count `n` (one pair per module in the chain)
//! - `n` (register, data) pairs, farthest module first
//! - Checksum: wrapping sum of all preceding bytes
//!
//! The bridge shifts the pairs out in order with CS held low, then latches.
//! Module 0 is the leftmost 8 columns of the panel (FC-16 wiring), which is
//! the farthest from the input pin, so its pair goes first.

use super::surface::Surface;

/// Frame signature byte.
pub const FRAME_SIGNATURE: u8 = 0xA5;

/// Largest chain a single frame can address.
pub const MAX_MODULES: u8 = 16;

/// MAX7219 control registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// BCD decode mode (0 = raw rows).
    DecodeMode = 0x09,
    /// Brightness (0-15).
    Intensity = 0x0A,
    /// Number of scanned rows minus one.
    ScanLimit = 0x0B,
    /// 0 = shutdown, 1 = normal operation.
    Shutdown = 0x0C,
    /// 1 = all LEDs on.
    DisplayTest = 0x0F,
}

/// Returns the digit register that drives `row` (0-7).
pub fn row_register(row: u16) -> u8 {
    0x01 + row as u8
}

fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &x| acc.wrapping_add(x))
}

/// Builds a frame from per-module (register, data) pairs, farthest module first.
pub fn build_frame(pairs: &[(u8, u8)]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(pairs.len() * 2 + 3);
    frame.push(FRAME_SIGNATURE);
    frame.push(pairs.len() as u8);
    for &(register, data) in pairs {
        frame.push(register);
        frame.push(data);
    }
    frame.push(checksum(&frame));
    frame
}

/// Builds a frame writing the same register value to every module.
pub fn build_broadcast(register: Register, data: u8, modules: u8) -> Vec<u8> {
    let pairs = vec![(register as u8, data); modules as usize];
    build_frame(&pairs)
}

/// Builds a frame carrying one pixel row of the surface to every module.
pub fn build_row_frame(surface: &Surface, row: u16, modules: u8) -> Vec<u8> {
    let register = row_register(row);
    let pairs: Vec<(u8, u8)> = (0..modules as u16)
        .map(|module| (register, surface.module_row(module, row)))
        .collect();
    build_frame(&pairs)
}

/// Builds the bring-up sequence for a chain.
pub fn build_init_sequence(modules: u8, intensity: u8, enabled: bool) -> Vec<Vec<u8>> {
    vec![
        build_broadcast(Register::DisplayTest, 0x00, modules),
        build_broadcast(Register::DecodeMode, 0x00, modules),
        build_broadcast(Register::ScanLimit, 0x07, modules),
        build_broadcast(Register::Intensity, intensity, modules),
        build_broadcast(Register::Shutdown, enabled as u8, modules),
    ]
}
