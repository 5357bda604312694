// src/processing/pipeline.rs
use anyhow::{Context, Result};
use std::path::Path;

use super::ndvi::{NdviCalculator, NODATA};
use crate::io::{row_windows, spawn_block_reader, FloatRasterWriter, GeoInfo, OutputOptions};

/// What was written by [`generate_ndvi`]
#[derive(Debug, Clone, PartialEq)]
pub struct NdviSummary {
    pub width: usize,
    pub height: usize,
    pub valid_pixels: usize,
    pub nodata_pixels: usize,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl NdviSummary {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            valid_pixels: 0,
            nodata_pixels: 0,
            min: None,
            max: None,
        }
    }

    fn accumulate(&mut self, block: &[f32]) {
        for &value in block {
            if value == NODATA {
                self.nodata_pixels += 1;
                continue;
            }
            self.valid_pixels += 1;
            self.min = Some(self.min.map_or(value, |m| m.min(value)));
            self.max = Some(self.max.map_or(value, |m| m.max(value)));
        }
    }
}

/// Compute NDVI from a red and a NIR raster and write it as a Float32 GeoTIFF
/// carrying the red raster's geotransform and projection.
pub fn generate_ndvi(
    red_path: &Path,
    nir_path: &Path,
    output_path: &Path,
    options: &OutputOptions,
) -> Result<NdviSummary> {
    let red_info = GeoInfo::open(red_path)?;
    let nir_info = GeoInfo::open(nir_path)?;

    if (red_info.width, red_info.height) != (nir_info.width, nir_info.height) {
        return Err(anyhow::anyhow!(
            "Band sizes differ: red is {}x{}, NIR is {}x{}",
            red_info.width,
            red_info.height,
            nir_info.width,
            nir_info.height
        ));
    }

    log::info!(
        "Computing NDVI for {}x{} pixels -> {}",
        red_info.width,
        red_info.height,
        output_path.display()
    );

    let calculator = NdviCalculator::new(
        red_info.nodata.map(|v| v as f32),
        nir_info.nodata.map(|v| v as f32),
    );

    let mut writer = FloatRasterWriter::create(
        output_path,
        &red_info,
        options,
        NODATA,
        calculator.name(),
    )?;

    let windows = row_windows(red_info.width, red_info.height, red_info.block_rows);
    log::debug!(
        "Processing {} windows of up to {} rows",
        windows.len(),
        red_info.block_rows
    );

    let (blocks, reader) = spawn_block_reader(red_path, nir_path, windows);
    let mut summary = NdviSummary::new(red_info.width, red_info.height);

    for block in blocks.iter() {
        let block = block?;
        let result = calculator.calculate(&block.red, &block.nir)?;

        summary.accumulate(result.data());
        writer
            .write(block.window, result)
            .with_context(|| format!("Failed to write NDVI rows at {}", block.window.y))?;
    }

    reader
        .join()
        .map_err(|_| anyhow::anyhow!("Band reader thread panicked"))?;
    writer.finish()?;

    if summary.valid_pixels == 0 {
        log::warn!("{} contains no valid NDVI pixels", output_path.display());
    }
    log::info!(
        "NDVI written: {} valid, {} no-data pixels",
        summary.valid_pixels,
        summary.nodata_pixels
    );

    Ok(summary)
}
