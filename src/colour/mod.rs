// src/colour/mod.rs
pub mod colour_map;
pub mod palette;
pub mod ramp;

pub use palette::{Palette, Rgb};
pub use ramp::{Breakpoint, ColourRamp, RampError};
