// src/colour/palette.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGB triplet as written to a colour-relief file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.0, self.1, self.2)
    }
}

/// Number of colours (and therefore breakpoints) in every palette
pub const PALETTE_SIZE: usize = 5;

const TERRAIN: [Rgb; PALETTE_SIZE] = [
    Rgb(48, 100, 102),
    Rgb(156, 171, 104),
    Rgb(204, 204, 102),
    Rgb(156, 132, 72),
    Rgb(110, 70, 44),
];

const RED_GREEN: [Rgb; PALETTE_SIZE] = [
    Rgb(100, 0, 0),
    Rgb(255, 0, 0),
    Rgb(255, 255, 0),
    Rgb(0, 200, 0),
    Rgb(0, 100, 0),
];

/// Fixed colour palettes. The first colour belongs to the highest breakpoint.
///
/// Accepted by name (`terrain`, `red-green`) or by legacy map number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "PaletteRepr", into = "String")]
pub enum Palette {
    Terrain,
    #[default]
    RedGreen,
}

impl Palette {
    /// Legacy numeric palette selector: 1 is terrain, everything else red-green
    pub fn from_map_number(map_number: i32) -> Self {
        if map_number == 1 {
            Palette::Terrain
        } else {
            Palette::RedGreen
        }
    }

    pub fn colours(&self) -> &'static [Rgb; PALETTE_SIZE] {
        match self {
            Palette::Terrain => &TERRAIN,
            Palette::RedGreen => &RED_GREEN,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Terrain => "terrain",
            Palette::RedGreen => "red-green",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim().to_lowercase();
        if let Ok(map_number) = s.parse::<i32>() {
            return Ok(Palette::from_map_number(map_number));
        }

        match s.as_str() {
            "terrain" => Ok(Palette::Terrain),
            "red-green" | "redgreen" => Ok(Palette::RedGreen),
            other => Err(anyhow::anyhow!(
                "Unknown palette: {} (expected terrain, red-green or a map number)",
                other
            )),
        }
    }
}

impl From<Palette> for String {
    fn from(palette: Palette) -> Self {
        palette.name().to_string()
    }
}

/// Config form: a palette name or a map number
#[derive(Deserialize)]
#[serde(untagged)]
enum PaletteRepr {
    Number(i32),
    Name(String),
}

impl TryFrom<PaletteRepr> for Palette {
    type Error = anyhow::Error;

    fn try_from(repr: PaletteRepr) -> anyhow::Result<Self> {
        match repr {
            PaletteRepr::Number(map_number) => Ok(Palette::from_map_number(map_number)),
            PaletteRepr::Name(name) => name.parse(),
        }
    }
}
