// src/colour/colour_map.rs
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::ramp::ColourRamp;

/// Value mapped to the first palette colour, condensing everything above the ramp
pub const CEILING_VALUE: &str = "1";
/// Cloud-masked pixels are stored as 0 and rendered grey
pub const CLOUD_MASK_ROW: &str = "0       175 175 175";
/// -1 is rendered fully transparent
pub const NO_DATA_ROW: &str = "-1    0 0 0 0";
/// GDAL keyword row for the band's declared no-data value
pub const NV_ROW: &str = "nv    0 0 0 0";

impl ColourRamp {
    /// Render the ramp as a `gdaldem color-relief` colour file
    pub fn to_colour_map(&self) -> String {
        let mut out = String::new();

        // writeln! into a String cannot fail
        let _ = writeln!(out, "{}       {}", CEILING_VALUE, self.first_colour());
        for bp in self.breakpoints() {
            let _ = writeln!(out, "{:.2}    {}", bp.value, bp.colour);
        }
        let _ = writeln!(out, "{}", CLOUD_MASK_ROW);
        let _ = writeln!(out, "{}", NO_DATA_ROW);
        let _ = writeln!(out, "{}", NV_ROW);

        out
    }

    pub fn write_colour_map(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_colour_map())
            .with_context(|| format!("Failed to write colour map {}", path.display()))?;
        log::debug!("Wrote colour map to {}", path.display());
        Ok(())
    }
}
