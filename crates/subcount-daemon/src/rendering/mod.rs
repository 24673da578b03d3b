//! Rendering module: bitmap font, glyph compositing, counter layout, scrolling.

#![allow(dead_code, unused_imports)]

pub mod font;
pub mod layout;
pub mod scroll;
pub mod sprite;

pub use layout::{compose, digit_len, layout, Cell};
pub use scroll::Scroller;
