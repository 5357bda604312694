// src/render/mod.rs
use anyhow::{Context, Result};
use gdal::raster::processing::dem::{color_relief, ColorReliefOptions};
use gdal::raster::{RasterBand, RasterCreationOptions};
use gdal::{Dataset, DriverManager};
use std::io::Write;
use std::path::Path;

use crate::colour::{ColourRamp, Palette};
use crate::io::row_windows;

/// Observed (min, max) of band 1.
///
/// Uses GDAL statistics, falling back to [`scan_range`] when GDAL
/// cannot provide them.
pub fn value_range(dataset: &Dataset) -> Result<(f64, f64)> {
    let band = dataset.rasterband(1)?;

    match band.get_statistics(true, true) {
        Ok(Some(stats)) => return Ok((stats.min, stats.max)),
        Ok(None) => log::debug!("GDAL returned no statistics, scanning band"),
        Err(e) => log::warn!("GDAL statistics failed ({}), scanning band", e),
    }

    scan_range(&band)
}

/// Min and max of a band read window by window, ignoring no-data and NaN
pub fn scan_range(band: &RasterBand) -> Result<(f64, f64)> {
    let nodata = band.no_data_value();
    let (width, height) = band.size();
    let mut range: Option<(f64, f64)> = None;

    for window in row_windows(width, height, band.block_size().1) {
        let buffer = band.read_as::<f64>(window.offset(), window.size(), window.size(), None)?;
        for &value in buffer.data() {
            if value.is_nan() || Some(value) == nodata {
                continue;
            }
            range = Some(match range {
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
                None => (value, value),
            });
        }
    }

    range.ok_or_else(|| anyhow::anyhow!("Band contains no valid pixels"))
}

/// Build the dynamic colour ramp for a single band raster
pub fn derive_ramp(input: &Path, palette: Palette) -> Result<ColourRamp> {
    let dataset =
        Dataset::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let (min, max) = value_range(&dataset)?;
    log::info!("Value range of {}: [{}, {}]", input.display(), min, max);

    Ok(ColourRamp::from_range(min, max, palette)?)
}

/// Run colour relief on `input` with the given colour file, adding an alpha band
pub fn colour_relief(input: &Path, output: &Path, colour_map: &Path) -> Result<()> {
    let dataset =
        Dataset::open(input).with_context(|| format!("Failed to open {}", input.display()))?;

    let mut options = ColorReliefOptions::new(colour_map);
    options.with_alpha(true).with_output_format("GTiff");

    color_relief(&dataset, output, &options)
        .with_context(|| format!("Colour relief of {} failed", input.display()))?;

    log::info!("Coloured image written to {}", output.display());
    Ok(())
}

/// Render `input` as a coloured GeoTIFF.
///
/// With no colour map a dynamic one is derived from the band's value range and
/// written to a temporary file that is removed afterwards.
pub fn colour_map_image(
    input: &Path,
    output: &Path,
    colour_map: Option<&Path>,
    palette: Palette,
) -> Result<()> {
    colour_map_image_in(input, output, colour_map, palette, &std::env::temp_dir())
}

/// [`colour_map_image`] keeping the dynamic colour map in `scratch_dir`
pub fn colour_map_image_in(
    input: &Path,
    output: &Path,
    colour_map: Option<&Path>,
    palette: Palette,
    scratch_dir: &Path,
) -> Result<()> {
    if let Some(colour_map) = colour_map {
        return colour_relief(input, output, colour_map);
    }

    let ramp = derive_ramp(input, palette)?;

    let mut file = tempfile::Builder::new()
        .prefix("colour_map_")
        .suffix(".txt")
        .tempfile_in(scratch_dir)
        .context("Failed to create temporary colour map")?;
    file.write_all(ramp.to_colour_map().as_bytes())?;
    file.flush()?;
    log::debug!("Dynamic colour map at {}", file.path().display());

    // dropping `file` removes it on both paths
    colour_relief(input, output, file.path())
}

/// Convert a GeoTIFF to PNG at full resolution
pub fn tiff_to_png(input: &Path, output: &Path) -> Result<()> {
    let dataset =
        Dataset::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let driver = DriverManager::get_driver_by_name("PNG")?;

    dataset
        .create_copy(&driver, output, &RasterCreationOptions::new())
        .with_context(|| format!("PNG conversion of {} failed", input.display()))?;

    log::info!("PNG written to {}", output.display());
    Ok(())
}
