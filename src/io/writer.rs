// src/io/writer.rs
use anyhow::{Context, Result};
use gdal::raster::{Buffer, RasterCreationOptions};
use gdal::{Dataset, DriverManager, Metadata};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::reader::{GeoInfo, Window};

/// GeoTIFF creation settings for derived rasters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    pub compress: String,
    pub compress_level: u8,
    pub tiled: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            compress: "DEFLATE".to_string(),
            compress_level: 6,
            tiled: true,
        }
    }
}

impl OutputOptions {
    pub fn creation_options(&self) -> Vec<String> {
        let mut options = Vec::new();
        let compress = self.compress.to_uppercase();

        if compress != "NONE" {
            options.push(format!("COMPRESS={}", compress));

            match compress.as_str() {
                "DEFLATE" => options.push(format!("ZLEVEL={}", self.compress_level.min(9))),
                "ZSTD" => options.push(format!("ZSTD_LEVEL={}", self.compress_level.min(22))),
                _ => {}
            }
        }

        if self.tiled {
            options.push("TILED=YES".to_string());
        }

        options.push("NUM_THREADS=ALL_CPUS".to_string());
        options
    }
}

/// Single band Float32 GeoTIFF georeferenced like its source
pub struct FloatRasterWriter {
    dataset: Dataset,
}

impl FloatRasterWriter {
    pub fn create(
        output_path: &Path,
        geo_info: &GeoInfo,
        options: &OutputOptions,
        nodata: f32,
        description: &str,
    ) -> Result<Self> {
        let driver = DriverManager::get_driver_by_name("GTiff")?;
        let creation_options = RasterCreationOptions::from_iter(options.creation_options());
        log::debug!("Creation options: {:?}", options.creation_options());

        let mut dataset = driver
            .create_with_band_type_with_options::<f32, _>(
                output_path,
                geo_info.width,
                geo_info.height,
                1,
                &creation_options,
            )
            .with_context(|| format!("Failed to create {}", output_path.display()))?;

        if !geo_info.projection.is_empty() {
            dataset.set_projection(&geo_info.projection)?;
        }
        if let Some(geo_transform) = &geo_info.geo_transform {
            dataset.set_geo_transform(geo_transform)?;
        }

        let mut band = dataset.rasterband(1)?;
        band.set_no_data_value(Some(nodata as f64))?;
        band.set_description(description)?;

        Ok(Self { dataset })
    }

    pub fn write(&mut self, window: Window, mut buffer: Buffer<f32>) -> Result<()> {
        let mut band = self.dataset.rasterband(1)?;
        band.write(window.offset(), window.size(), &mut buffer)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.dataset.flush_cache()?;
        Ok(())
    }
}
