// src/colour/ramp.rs
use thiserror::Error;

use super::palette::{Palette, Rgb, PALETTE_SIZE};

#[derive(Debug, Error, PartialEq)]
pub enum RampError {
    #[error("Value range bound is not finite (min: {min}, max: {max})")]
    NonFinite { min: f64, max: f64 },
    #[error("Minimum {min} is greater than maximum {max}")]
    InvertedRange { min: f64, max: f64 },
}

/// A single colour-relief entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub value: f64,
    pub colour: Rgb,
}

/// Colour ramp derived from the observed value range of a raster.
///
/// Breakpoints are stored highest value first, so breakpoint `i` carries
/// palette colour `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourRamp {
    palette: Palette,
    breakpoints: Vec<Breakpoint>,
}

impl ColourRamp {
    /// Split `[min, max)` into five equal steps and pair the step starts,
    /// highest first, with the palette colours.
    pub fn from_range(min: f64, max: f64, palette: Palette) -> Result<Self, RampError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RampError::NonFinite { min, max });
        }
        if min > max {
            return Err(RampError::InvertedRange { min, max });
        }

        let increment = (max - min) / PALETTE_SIZE as f64;
        let colours = palette.colours();

        let breakpoints = (0..PALETTE_SIZE)
            .rev()
            .map(|step| min + step as f64 * increment)
            .zip(colours.iter())
            .map(|(value, &colour)| Breakpoint {
                value: round_to_hundredths(value),
                colour,
            })
            .collect();

        Ok(Self {
            palette,
            breakpoints,
        })
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Colour used above the ramp and for the top breakpoint
    pub fn first_colour(&self) -> Rgb {
        self.palette.colours()[0]
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    let rounded = (value * 100.0).round_ties_even() / 100.0;
    // keep -0.0 out of the colour map
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
